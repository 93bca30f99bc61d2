//! fhirdate – partial-precision FHIR date/time values that write back exactly as they were read.
//!
//! FHIR exchanges dates as ISO 8601 derived strings of varying precision: a
//! year alone, a year and month, a full date, or a date and time with an
//! optional fraction and zone. A parsed value is normalized into a chrono
//! date or datetime (see [`datatype::Moment`]). That normalized value alone
//! cannot say whether the source read `"1986"` or `"1986-01-01"`, or whether
//! it ended in `Z` or `+00:00`. A [`FhirDate`] therefore also keeps the precision
//! it was written with and the original text. Serializing it reproduces the
//! input character for character.
//!
//! ## Modules
//! * [`grammar`] – Ordered, tagged rules classifying date and time strings by precision.
//! * [`parse`] – The [`DateInput`] union and conversion of input into a [`datatype::Moment`].
//! * [`format`] – Rebuilding the original text from a moment and its recorded precision.
//! * [`datatype`] – The [`FhirDate`] value itself, with JSON and SQLite conversions.
//! * [`settings`] – Runtime settings read through the `config` crate.
//! * [`logging`] – Optional `tracing-subscriber` bootstrap.
//!
//! ## Supported Notation
//! Dates: `CC`, `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `YYYY-Www`, `YYYY-Www-D`,
//! `YYYY-DDD` (plus the basic forms without dashes). Times after `T`: `hh`,
//! `hh:mm`, `hh:mm:ss`, `hh:mm:ss.fff` (plus basic forms), each optionally
//! followed by `Z`, `±hh`, `±hhmm` or `±hh:mm`. Basic forms are written back in
//! extended notation.
//!
//! ## Failure Policy
//! A string that cannot be read never aborts the caller. It yields an empty
//! value (serializing to `null`) and a `warn` event. Only structurally wrong
//! input, such as a JSON object where a date was expected, is an error
//! ([`FhirDateError::TypeKind`]).
//!
//! ## Quick Start
//! ```
//! use fhirdate::FhirDate;
//! let date = FhirDate::parse("2013-01-01T10:50Z");
//! assert_eq!(date.as_json().as_deref(), Some("2013-01-01T10:50Z"));
//! let partial = FhirDate::parse("1986-09");
//! assert_eq!(partial.date(), chrono::NaiveDate::from_ymd_opt(1986, 9, 1));
//! assert_eq!(partial.to_string(), "1986-09");
//! ```

pub mod datatype;
pub mod format;
pub mod grammar;
pub mod logging;
pub mod parse;
pub mod settings;
mod error;

pub use datatype::{FhirDate, Moment};
pub use error::{FhirDateError, Result};
pub use grammar::{DatePrecision, Precision, TimePrecision};
pub use parse::DateInput;
pub use settings::Settings;
