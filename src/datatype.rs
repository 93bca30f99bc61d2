// used for persistence
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
// used for the normalized values
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
// used for reading and writing JSON
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

// used to print out readable forms of a date
use std::fmt;

use crate::error::{FhirDateError, Result};
use crate::format;
use crate::grammar::Precision;
use crate::parse::{self, DateInput};
use crate::settings::Settings;

/// The normalized value behind a [`FhirDate`].
#[derive(Eq, PartialEq, Debug, Hash, Clone, Copy)]
pub enum Moment {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}
impl Moment {
    pub fn date(&self) -> NaiveDate {
        match self {
            Moment::Date(date) => *date,
            Moment::DateTime(datetime) => datetime.date(),
            Moment::Zoned(datetime) => datetime.date_naive(),
        }
    }
    pub fn offset(&self) -> Option<FixedOffset> {
        match self {
            Moment::Zoned(datetime) => Some(*datetime.offset()),
            _ => None,
        }
    }
    /// Sub-second part in microseconds, zero for plain dates. A leap second
    /// reports a value of one million or more.
    pub fn microsecond(&self) -> u32 {
        match self {
            Moment::Date(_) => 0,
            Moment::DateTime(datetime) => datetime.nanosecond() / 1_000,
            Moment::Zoned(datetime) => datetime.nanosecond() / 1_000,
        }
    }
}
impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format::iso_format(self))
    }
}

/// A FHIR `date`, `dateTime` or `instant` value.
///
/// The text a value was parsed from is kept next to the normalized
/// [`Moment`], so that [`FhirDate::as_json`] gives back exactly what was
/// supplied: `"1986-09"` stays `"1986-09"` and `"2013-01-01T10:50Z"` keeps its `Z`.
/// Values built from native chrono types have no such text and render at full
/// precision.
#[derive(Eq, PartialEq, Debug, Hash, Clone, Default)]
pub struct FhirDate {
    moment: Option<Moment>,
    precision: Option<Precision>,
    original: Option<String>,
}
impl FhirDate {
    /// Builds a value from any [`DateInput`]. Malformed text does not fail,
    /// it yields a value without a moment and a warning.
    pub fn new<T: Into<DateInput>>(input: T) -> FhirDate {
        parse::build(input.into())
    }
    pub fn parse(text: &str) -> FhirDate {
        FhirDate::new(text)
    }
    /// Builds one value per input, in order.
    pub fn new_all<I, T>(inputs: I) -> Vec<FhirDate>
    where
        I: IntoIterator<Item = T>,
        T: Into<DateInput>,
    {
        inputs.into_iter().map(FhirDate::new).collect()
    }
    /// Builds a value from a JSON field. Strings are parsed, `null` gives an
    /// empty value, and integers are epoch seconds when the legacy mode is on.
    /// Anything else is a type error.
    pub fn from_json(value: &Value, settings: &Settings) -> Result<FhirDate> {
        match value {
            Value::Null => Ok(FhirDate::default()),
            Value::String(text) => Ok(FhirDate::parse(text)),
            Value::Number(number) if number.is_i64() || number.is_u64() => {
                if !settings.legacy_epoch_seconds {
                    return Err(FhirDateError::type_kind("integer"));
                }
                match number.as_i64() {
                    Some(seconds) => Ok(FhirDate::new(DateInput::EpochSeconds(seconds))),
                    None => {
                        warn!("Failed to initialize FhirDate from epoch seconds {}", number);
                        Ok(FhirDate::default())
                    }
                }
            }
            Value::Number(_) => Err(FhirDateError::type_kind("number")),
            Value::Bool(_) => Err(FhirDateError::type_kind("boolean")),
            Value::Array(_) => Err(FhirDateError::type_kind("array")),
            Value::Object(_) => Err(FhirDateError::type_kind("object")),
        }
    }
    /// Like [`FhirDate::from_json`], mapping arrays element-wise. A single
    /// value gives a list of one.
    pub fn from_json_list(value: &Value, settings: &Settings) -> Result<Vec<FhirDate>> {
        match value {
            Value::Array(values) => values.iter().map(|v| FhirDate::from_json(v, settings)).collect(),
            single => Ok(vec![FhirDate::from_json(single, settings)?]),
        }
    }
    pub(crate) fn from_parts(moment: Option<Moment>, precision: Option<Precision>, original: Option<String>) -> FhirDate {
        FhirDate { moment, precision, original }
    }
    /// Swaps in a new moment. The recorded precision and original text belong
    /// to the old moment and are dropped, so the new one renders at full
    /// precision.
    pub fn replace(&mut self, moment: Option<Moment>) {
        self.precision = None;
        self.original = None;
        self.moment = moment;
    }
    pub fn moment(&self) -> Option<&Moment> {
        self.moment.as_ref()
    }
    pub fn date(&self) -> Option<NaiveDate> {
        self.moment.as_ref().map(Moment::date)
    }
    pub fn precision(&self) -> Option<&Precision> {
        self.precision.as_ref()
    }
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }
    pub fn is_empty(&self) -> bool {
        self.moment.is_none()
    }
    /// The text to write back out, `None` if nothing was ever parsed.
    pub fn as_json(&self) -> Option<String> {
        format::synthesize(self.moment.as_ref(), self.precision.as_ref(), self.original.as_deref())
    }
    /// Full-precision ISO 8601 text, regardless of how the value was written.
    pub fn iso_string(&self) -> Option<String> {
        self.moment.as_ref().map(format::iso_format)
    }
}
impl From<NaiveDate> for FhirDate {
    fn from(date: NaiveDate) -> Self {
        FhirDate::new(date)
    }
}
impl From<NaiveDateTime> for FhirDate {
    fn from(datetime: NaiveDateTime) -> Self {
        FhirDate::new(datetime)
    }
}
impl From<DateTime<FixedOffset>> for FhirDate {
    fn from(datetime: DateTime<FixedOffset>) -> Self {
        FhirDate::new(datetime)
    }
}
impl From<&str> for FhirDate {
    fn from(text: &str) -> Self {
        FhirDate::parse(text)
    }
}
impl fmt::Display for FhirDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.as_json() {
            Some(text) => write!(f, "{}", text),
            None => Ok(()),
        }
    }
}
impl Serialize for FhirDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.as_json() {
            Some(text) => serializer.serialize_str(&text),
            None => serializer.serialize_none(),
        }
    }
}
struct FhirDateVisitor;
impl<'de> Visitor<'de> for FhirDateVisitor {
    type Value = FhirDate;
    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("string or datetime")
    }
    fn visit_str<E: de::Error>(self, text: &str) -> std::result::Result<FhirDate, E> {
        Ok(FhirDate::parse(text))
    }
    fn visit_none<E: de::Error>(self) -> std::result::Result<FhirDate, E> {
        Ok(FhirDate::default())
    }
    fn visit_unit<E: de::Error>(self) -> std::result::Result<FhirDate, E> {
        Ok(FhirDate::default())
    }
    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<FhirDate, D::Error> {
        deserializer.deserialize_any(FhirDateVisitor)
    }
}
impl<'de> Deserialize<'de> for FhirDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<FhirDate, D::Error> {
        deserializer.deserialize_any(FhirDateVisitor)
    }
}
impl ToSql for FhirDate {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self.as_json() {
            Some(text) => ToSqlOutput::from(text),
            None => ToSqlOutput::from(rusqlite::types::Null),
        })
    }
}
impl FromSql for FhirDate {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Ok(FhirDate::default()),
            other => other.as_str().map(FhirDate::parse),
        }
    }
}
