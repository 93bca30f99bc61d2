//! Rebuilding the exact text a value was parsed from.

use chrono::{DateTime, FixedOffset};
// used to render into a string without panicking on unsupported patterns
use std::fmt::Write;

use crate::datatype::Moment;
use crate::grammar::{self, Precision};

/// Renders a moment with the precision and notation it was supplied with.
///
/// Without a recorded precision the moment is rendered at full precision
/// (see [`iso_format`]). Fractional seconds are narrowed to milliseconds by
/// truncation. At most three fraction digits are written, but never more
/// than the original text had, so `.8` stays `.8` while `.8174999` becomes
/// `.817`. A zone designator that denotes the same offset as the
/// rendered one is restored as it was originally written.
pub fn synthesize(moment: Option<&Moment>, precision: Option<&Precision>, original: Option<&str>) -> Option<String> {
    let moment = moment?;
    let Some(precision) = precision else {
        return Some(iso_format(moment));
    };
    let Some(mut out) = render(moment, &precision.pattern()) else {
        return Some(iso_format(moment));
    };
    if precision.has_fraction() {
        let digits = original
            .and_then(grammar::fraction_digits)
            .map_or(3, |written| written.min(3));
        let millis = format!("{:03}", moment.microsecond() % 1_000_000 / 1000);
        out.push('.');
        out.push_str(&millis[..digits]);
    }
    if precision.zoned {
        if let Moment::Zoned(datetime) = moment {
            out.push_str(&zone_token(datetime, original));
        }
    }
    Some(out)
}

/// Full-precision ISO 8601 rendering, ignoring how the value was written.
pub fn iso_format(moment: &Moment) -> String {
    match moment {
        Moment::Date(date) => date.format("%Y-%m-%d").to_string(),
        Moment::DateTime(datetime) => datetime.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        Moment::Zoned(datetime) => datetime.format("%Y-%m-%dT%H:%M:%S%.f%:z").to_string(),
    }
}

fn render(moment: &Moment, pattern: &str) -> Option<String> {
    let mut out = String::new();
    let written = match moment {
        Moment::Date(date) => write!(out, "{}", date.format(pattern)),
        Moment::DateTime(datetime) => write!(out, "{}", datetime.format(pattern)),
        Moment::Zoned(datetime) => write!(out, "{}", datetime.format(pattern)),
    };
    written.ok().map(|_| out)
}

fn zone_token(datetime: &DateTime<FixedOffset>, original: Option<&str>) -> String {
    let rendered = datetime.format("%:z").to_string();
    match original.and_then(grammar::zone_suffix) {
        Some(written) if written != rendered && grammar::parse_offset(written) == Some(*datetime.offset()) => {
            written.to_string()
        }
        _ => rendered,
    }
}
