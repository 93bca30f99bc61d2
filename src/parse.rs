//! Turning caller input into a normalized [`Moment`].
//!
//! Text goes through the grammar first so that its precision can be
//! recorded. Anything the grammar does not recognize gets one more chance with
//! chrono's own parsers before the value is given up on. Values read that way
//! carry no precision: they are normalized (`"1986-9-21"` writes back as
//! `"1986-09-21"`) and do not round-trip.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
// used when handing text to chrono's own parsers
use std::str::FromStr;
use tracing::{debug, trace, warn};

use crate::datatype::{FhirDate, Moment};
use crate::grammar::{self, DateMatch, DatePrecision, Precision, TimeMatch};

/// Everything a [`FhirDate`] can be built from.
#[derive(Debug, Clone)]
pub enum DateInput {
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
    /// Legacy input: Unix epoch seconds, read as a naive UTC datetime.
    EpochSeconds(i64),
    /// An already built value, passed through untouched.
    Parsed(FhirDate),
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}
impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}
impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}
impl From<NaiveDateTime> for DateInput {
    fn from(datetime: NaiveDateTime) -> Self {
        DateInput::DateTime(datetime)
    }
}
impl From<DateTime<FixedOffset>> for DateInput {
    fn from(datetime: DateTime<FixedOffset>) -> Self {
        DateInput::Zoned(datetime)
    }
}
impl From<FhirDate> for DateInput {
    fn from(date: FhirDate) -> Self {
        DateInput::Parsed(date)
    }
}

pub(crate) fn build(input: DateInput) -> FhirDate {
    match input {
        DateInput::Parsed(date) => date,
        DateInput::Date(date) => FhirDate::from_parts(Some(Moment::Date(date)), None, None),
        DateInput::DateTime(datetime) => FhirDate::from_parts(Some(Moment::DateTime(datetime)), None, None),
        DateInput::Zoned(datetime) => FhirDate::from_parts(Some(Moment::Zoned(datetime)), None, None),
        DateInput::EpochSeconds(seconds) => match DateTime::<Utc>::from_timestamp(seconds, 0) {
            Some(utc) => FhirDate::from_parts(Some(Moment::DateTime(utc.naive_utc())), None, None),
            None => {
                warn!("Failed to initialize FhirDate from epoch seconds {}", seconds);
                FhirDate::default()
            }
        },
        DateInput::Text(text) => match parse_text(&text) {
            Some((moment, precision)) => FhirDate::from_parts(Some(moment), precision, Some(text)),
            None => {
                warn!("Failed to initialize FhirDate from \"{}\"", text);
                FhirDate::default()
            }
        },
    }
}

/// Parses a date or date/time text. The precision is `None` when only the
/// chrono fallback could make sense of it.
pub fn parse_text(text: &str) -> Option<(Moment, Option<Precision>)> {
    if let Some((moment, precision)) = parse_with_grammar(text) {
        trace!("parsed {:?} as {}", text, precision);
        return Some((moment, Some(precision)));
    }
    let moment = parse_with_chrono(text)?;
    debug!("parsed {:?} without a known precision", text);
    Some((moment, None))
}

fn parse_with_grammar(text: &str) -> Option<(Moment, Precision)> {
    match text.split_once('T') {
        None => {
            let found = grammar::classify_date(text)?;
            let date = to_date(&found)?;
            Some((Moment::Date(date), Precision::date_only(found.precision)))
        }
        Some((date_part, time_part)) => {
            let found_date = grammar::classify_date(date_part)?;
            let found_time = grammar::classify_time(time_part)?;
            let naive = to_date(&found_date)?.and_time(to_time(&found_time)?);
            let precision = Precision {
                date: found_date.precision,
                time: Some(found_time.precision),
                zoned: found_time.zone.is_some(),
            };
            let moment = match found_time.zone {
                Some(zone) => {
                    let offset = grammar::parse_offset(zone)?;
                    Moment::Zoned(naive.and_local_timezone(offset).single()?)
                }
                None => Moment::DateTime(naive),
            };
            Some((moment, precision))
        }
    }
}

fn parse_with_chrono(text: &str) -> Option<Moment> {
    if let Ok(zoned) = DateTime::<FixedOffset>::from_str(text) {
        return Some(Moment::Zoned(zoned));
    }
    if let Ok(naive) = NaiveDateTime::from_str(text) {
        return Some(Moment::DateTime(naive));
    }
    NaiveDate::from_str(text).ok().map(Moment::Date)
}

fn to_date(found: &DateMatch) -> Option<NaiveDate> {
    let year = || found.field("year").map(|y| y as i32);
    match found.precision {
        // "19" is the first year of the 20th century
        DatePrecision::Century => NaiveDate::from_ymd_opt(found.field("century")? as i32 * 100 + 1, 1, 1),
        DatePrecision::Year => NaiveDate::from_ymd_opt(year()?, 1, 1),
        DatePrecision::YearMonth => NaiveDate::from_ymd_opt(year()?, found.field("month")?, 1),
        DatePrecision::YearMonthDay => NaiveDate::from_ymd_opt(year()?, found.field("month")?, found.field("day")?),
        DatePrecision::YearWeek => NaiveDate::from_isoywd_opt(year()?, found.field("week")?, Weekday::Mon),
        DatePrecision::YearWeekDay => {
            NaiveDate::from_isoywd_opt(year()?, found.field("week")?, iso_weekday(found.field("weekday")?)?)
        }
        DatePrecision::YearDayOfYear => NaiveDate::from_yo_opt(year()?, found.field("ordinal")?),
    }
}

fn to_time(found: &TimeMatch) -> Option<NaiveTime> {
    let hour = found.field("hour")?;
    let minute = found.field("minute").unwrap_or(0);
    let second = found.field("second").unwrap_or(0);
    let micro = found.fraction().map_or(0, micros);
    if second == 60 {
        // chrono keeps a leap second as :59 plus a full extra second of micros
        return NaiveTime::from_hms_micro_opt(hour, minute, 59, micro + 1_000_000);
    }
    NaiveTime::from_hms_micro_opt(hour, minute, second, micro)
}

// digits past the sixth are dropped, never rounded
fn micros(fraction: &str) -> u32 {
    let digits: String = fraction
        .chars()
        .chain(std::iter::repeat('0'))
        .take(6)
        .collect();
    digits.parse().unwrap_or(0)
}

fn iso_weekday(number: u32) -> Option<Weekday> {
    match number {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}
