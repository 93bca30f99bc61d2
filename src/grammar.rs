//! Ordered grammar rules for partial-precision dates and times.
//!
//! Each rule is a whole-string pattern tagged with the precision it stands
//! for. Rules are tried from most to least specific and the first structural
//! match wins, so a new precision variant only needs a new row in a table.

// the "standard" regular expression package
use regex::{Captures, Regex};
// so regular expressions don't have to be recompiled
use lazy_static::lazy_static;
// used when reading timezone designators
use chrono::FixedOffset;
// used to print out readable forms of a precision
use std::fmt;

/// Which calendar fields were present in a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePrecision {
    Century,
    Year,
    YearMonth,
    YearMonthDay,
    YearWeek,
    YearWeekDay,
    YearDayOfYear,
}

impl DatePrecision {
    /// The chrono pattern rendering a date at this precision.
    pub fn pattern(&self) -> &'static str {
        match self {
            DatePrecision::Century => "%C",
            DatePrecision::Year => "%Y",
            DatePrecision::YearMonth => "%Y-%m",
            DatePrecision::YearMonthDay => "%Y-%m-%d",
            DatePrecision::YearWeek => "%G-W%V",
            DatePrecision::YearWeekDay => "%G-W%V-%u",
            DatePrecision::YearDayOfYear => "%Y-%j",
        }
    }
}

/// Which clock fields were present in a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimePrecision {
    Hour,
    HourMinute,
    HourMinuteSecond,
    HourMinuteSecondFraction,
}

impl TimePrecision {
    /// The chrono pattern for the whole-second part of a time. Fractions are
    /// appended separately since they are narrowed to milliseconds.
    pub fn pattern(&self) -> &'static str {
        match self {
            TimePrecision::Hour => "%H",
            TimePrecision::HourMinute => "%H:%M",
            TimePrecision::HourMinuteSecond | TimePrecision::HourMinuteSecondFraction => "%H:%M:%S",
        }
    }
}

/// The precision descriptor of a parsed text: date token, optional time
/// token, and whether a zone designator followed the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Precision {
    pub date: DatePrecision,
    pub time: Option<TimePrecision>,
    pub zoned: bool,
}

impl Precision {
    pub fn date_only(date: DatePrecision) -> Precision {
        Precision { date, time: None, zoned: false }
    }
    pub fn has_fraction(&self) -> bool {
        self.time == Some(TimePrecision::HourMinuteSecondFraction)
    }
    /// Chrono pattern for everything but the fraction and the zone.
    pub fn pattern(&self) -> String {
        match self.time {
            Some(time) => format!("{}T{}", self.date.pattern(), time.pattern()),
            None => self.date.pattern().to_string(),
        }
    }
}
impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pattern())?;
        if self.has_fraction() {
            write!(f, "%.3f")?;
        }
        if self.zoned {
            write!(f, "%:z")?;
        }
        Ok(())
    }
}

struct DateRule {
    precision: DatePrecision,
    pattern: Regex,
}

struct TimeRule {
    precision: TimePrecision,
    pattern: Regex,
}

fn date_rule(precision: DatePrecision, pattern: &str) -> DateRule {
    DateRule { precision, pattern: Regex::new(pattern).unwrap() }
}

fn time_rule(precision: TimePrecision, pattern: &str) -> TimeRule {
    TimeRule { precision, pattern: Regex::new(pattern).unwrap() }
}

lazy_static! {
    // most specific first, extended notation before basic
    static ref DATE_RULES: Vec<DateRule> = vec![
        date_rule(DatePrecision::YearMonthDay, r"^(?P<year>[0-9]{4})-(?P<month>[0-9]{2})-(?P<day>[0-9]{2})$"),
        date_rule(DatePrecision::YearMonthDay, r"^(?P<year>[0-9]{4})(?P<month>[0-9]{2})(?P<day>[0-9]{2})$"),
        date_rule(DatePrecision::YearWeekDay, r"^(?P<year>[0-9]{4})-W(?P<week>[0-9]{2})-(?P<weekday>[1-7])$"),
        date_rule(DatePrecision::YearWeekDay, r"^(?P<year>[0-9]{4})W(?P<week>[0-9]{2})(?P<weekday>[1-7])$"),
        date_rule(DatePrecision::YearWeek, r"^(?P<year>[0-9]{4})-W(?P<week>[0-9]{2})$"),
        date_rule(DatePrecision::YearWeek, r"^(?P<year>[0-9]{4})W(?P<week>[0-9]{2})$"),
        date_rule(DatePrecision::YearDayOfYear, r"^(?P<year>[0-9]{4})-(?P<ordinal>[0-9]{3})$"),
        date_rule(DatePrecision::YearDayOfYear, r"^(?P<year>[0-9]{4})(?P<ordinal>[0-9]{3})$"),
        date_rule(DatePrecision::YearMonth, r"^(?P<year>[0-9]{4})-(?P<month>[0-9]{2})$"),
        date_rule(DatePrecision::Year, r"^(?P<year>[0-9]{4})$"),
        date_rule(DatePrecision::Century, r"^(?P<century>[0-9]{2})$"),
    ];
    static ref TIME_RULES: Vec<TimeRule> = vec![
        time_rule(TimePrecision::HourMinuteSecondFraction, r"^(?P<hour>[0-9]{2}):(?P<minute>[0-9]{2}):(?P<second>[0-9]{2})\.(?P<fraction>[0-9]+)$"),
        time_rule(TimePrecision::HourMinuteSecondFraction, r"^(?P<hour>[0-9]{2})(?P<minute>[0-9]{2})(?P<second>[0-9]{2})\.(?P<fraction>[0-9]+)$"),
        time_rule(TimePrecision::HourMinuteSecond, r"^(?P<hour>[0-9]{2}):(?P<minute>[0-9]{2}):(?P<second>[0-9]{2})$"),
        time_rule(TimePrecision::HourMinuteSecond, r"^(?P<hour>[0-9]{2})(?P<minute>[0-9]{2})(?P<second>[0-9]{2})$"),
        time_rule(TimePrecision::HourMinute, r"^(?P<hour>[0-9]{2}):(?P<minute>[0-9]{2})$"),
        time_rule(TimePrecision::HourMinute, r"^(?P<hour>[0-9]{2})(?P<minute>[0-9]{2})$"),
        time_rule(TimePrecision::Hour, r"^(?P<hour>[0-9]{2})$"),
    ];
    static ref ZONE_SUFFIX: Regex = Regex::new(r"(?:Z|[+-][0-9]{2}(?::?[0-9]{2})?)$").unwrap();
    static ref FRACTION: Regex = Regex::new(r"\.(?P<fraction>[0-9]+)(?:Z|[+-][0-9]{2}(?::?[0-9]{2})?)?$").unwrap();
    static ref OFFSET: Regex = Regex::new(r"^(?P<sign>[+-])(?P<hours>[0-9]{2})(?::?(?P<minutes>[0-9]{2}))?$").unwrap();
}

/// A date string recognized by one of the date rules.
#[derive(Debug)]
pub struct DateMatch<'t> {
    pub precision: DatePrecision,
    captures: Captures<'t>,
}

impl<'t> DateMatch<'t> {
    /// Numeric value of a captured field (`year`, `month`, `day`, `week`,
    /// `weekday`, `ordinal` or `century`), if the rule has it.
    pub fn field(&self, name: &str) -> Option<u32> {
        self.captures.name(name)?.as_str().parse().ok()
    }
}

/// A time string recognized by one of the time rules.
#[derive(Debug)]
pub struct TimeMatch<'t> {
    pub precision: TimePrecision,
    pub zone: Option<&'t str>,
    captures: Captures<'t>,
}

impl<'t> TimeMatch<'t> {
    pub fn field(&self, name: &str) -> Option<u32> {
        self.captures.name(name)?.as_str().parse().ok()
    }
    /// The fractional-second digits exactly as written.
    pub fn fraction(&self) -> Option<&'t str> {
        self.captures.name("fraction").map(|m| m.as_str())
    }
}

/// Classifies a date-only string. `None` when no rule matches it whole.
pub fn classify_date(text: &str) -> Option<DateMatch<'_>> {
    DATE_RULES.iter().find_map(|rule| {
        rule.pattern
            .captures(text)
            .map(|captures| DateMatch { precision: rule.precision, captures })
    })
}

/// Classifies a time-only string, possibly followed by a zone designator.
/// The designator is recorded on the match and never changes its precision.
/// An empty string has no time and yields `None`.
pub fn classify_time(text: &str) -> Option<TimeMatch<'_>> {
    let (clock, zone) = match ZONE_SUFFIX.find(text) {
        Some(found) => (&text[..found.start()], Some(found.as_str())),
        None => (text, None),
    };
    TIME_RULES.iter().find_map(|rule| {
        rule.pattern
            .captures(clock)
            .map(|captures| TimeMatch { precision: rule.precision, zone, captures })
    })
}

// only the part after the date/time separator can carry a zone or a fraction
fn time_part(text: &str) -> Option<&str> {
    text.split_once('T').map(|(_, time)| time)
}

/// The trailing zone designator of a full date/time text, as written.
pub fn zone_suffix(text: &str) -> Option<&str> {
    ZONE_SUFFIX.find(time_part(text)?).map(|found| found.as_str())
}

/// Number of fractional-second digits written in a full date/time text.
pub fn fraction_digits(text: &str) -> Option<usize> {
    FRACTION
        .captures(time_part(text)?)?
        .name("fraction")
        .map(|m| m.as_str().len())
}

/// Reads a zone designator (`Z`, `±HH`, `±HHMM` or `±HH:MM`).
pub fn parse_offset(token: &str) -> Option<FixedOffset> {
    if token == "Z" {
        return FixedOffset::east_opt(0);
    }
    let captures = OFFSET.captures(token)?;
    let hours: i32 = captures["hours"].parse().ok()?;
    let minutes: i32 = match captures.name("minutes") {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    let seconds = (hours * 60 + minutes) * 60;
    if &captures["sign"] == "-" {
        FixedOffset::west_opt(seconds)
    } else {
        FixedOffset::east_opt(seconds)
    }
}
