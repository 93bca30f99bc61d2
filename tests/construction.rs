use chrono::{FixedOffset, NaiveDate, TimeZone};
use fhirdate::{DateInput, FhirDate, Moment};

fn zoned(text: &str) -> chrono::DateTime<FixedOffset> {
    chrono::DateTime::parse_from_rfc3339(text).unwrap()
}

#[test]
fn native_date_renders_full_precision() {
    let native = NaiveDate::from_ymd_opt(1986, 9, 21).unwrap();
    let date = FhirDate::from(native);
    assert_eq!(date.date(), Some(native));
    assert_eq!(date.precision(), None);
    assert_eq!(date.original(), None);
    assert_eq!(date.as_json().as_deref(), Some("1986-09-21"));
}

#[test]
fn native_datetimes_render_full_precision() {
    let native = NaiveDate::from_ymd_opt(1986, 9, 21).unwrap().and_hms_opt(10, 15, 49).unwrap();
    let date = FhirDate::new(native);
    assert_eq!(date.precision(), None);
    assert_eq!(date.as_json().as_deref(), Some("1986-09-21T10:15:49"));

    // no truncation without a recorded precision
    let date = FhirDate::new(zoned("2015-02-09T11:04:15.817499-05:00"));
    assert_eq!(date.as_json().as_deref(), Some("2015-02-09T11:04:15.817499-05:00"));
}

#[test]
fn epoch_seconds_are_naive_utc() {
    let date = FhirDate::new(DateInput::EpochSeconds(0));
    assert!(matches!(date.moment(), Some(Moment::DateTime(_))));
    assert_eq!(date.as_json().as_deref(), Some("1970-01-01T00:00:00"));

    let date = FhirDate::new(DateInput::EpochSeconds(1_000_000_000));
    assert_eq!(date.as_json().as_deref(), Some("2001-09-09T01:46:40"));

    let date = FhirDate::new(DateInput::EpochSeconds(i64::MAX));
    assert!(date.is_empty());
}

#[test]
fn wrapping_a_value_again_returns_it_unchanged() {
    let parsed = FhirDate::parse("1986-W20-5");
    let again = FhirDate::new(parsed.clone());
    assert_eq!(again, parsed);
    assert_eq!(again.original(), Some("1986-W20-5"));
    assert_eq!(again.precision(), parsed.precision());

    let empty = FhirDate::new(FhirDate::parse("not a date"));
    assert!(empty.is_empty());
}

#[test]
fn malformed_content_gives_an_empty_value() {
    for text in ["1986-21-21", "1986-02-30", "1986-366", "2019-W53", "2013-01-01T25:00", "2013-01-01T", "2013-01-01T10:50+24:00", "yesterday", ""] {
        let date = FhirDate::parse(text);
        assert!(date.is_empty(), "{text:?} should not parse");
        assert_eq!(date.moment(), None);
        assert_eq!(date.precision(), None);
        assert_eq!(date.original(), None);
        assert_eq!(date.as_json(), None);
        assert_eq!(date.to_string(), "");
    }
}

#[test]
fn unknown_notation_falls_back_to_chrono() {
    let date = FhirDate::parse("+12345-6-7");
    assert_eq!(date.date(), NaiveDate::from_ymd_opt(12345, 6, 7));
    assert_eq!(date.precision(), None);
    assert_eq!(date.original(), Some("+12345-6-7"));
}

#[test]
fn replacing_the_moment_drops_recorded_notation() {
    let mut date = FhirDate::parse("2013-01-01T10:50Z");
    assert!(date.precision().is_some());

    let utc = FixedOffset::east_opt(0).unwrap();
    let replacement = utc.with_ymd_and_hms(2013, 1, 1, 10, 50, 0).unwrap();
    date.replace(Some(Moment::Zoned(replacement)));
    assert_eq!(date.precision(), None);
    assert_eq!(date.original(), None);
    assert_eq!(date.as_json().as_deref(), Some("2013-01-01T10:50:00+00:00"));

    date.replace(None);
    assert!(date.is_empty());
    assert_eq!(date.as_json(), None);
}

#[test]
fn sequences_keep_order_and_length() {
    let dates = FhirDate::new_all(["1986", "bogus", "1986-09-21T10:15"]);
    assert_eq!(dates.len(), 3);
    assert_eq!(dates[0].as_json().as_deref(), Some("1986"));
    assert!(dates[1].is_empty());
    assert_eq!(dates[2].as_json().as_deref(), Some("1986-09-21T10:15"));

    let natives = FhirDate::new_all(vec![
        DateInput::Date(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()),
        DateInput::Text("2000-W01".to_string()),
        DateInput::EpochSeconds(86_400),
    ]);
    let written: Vec<String> = natives.iter().map(|d| d.to_string()).collect();
    assert_eq!(written, ["2000-01-01", "2000-W01", "1970-01-02T00:00:00"]);
}

#[test]
fn display_matches_json_text() {
    assert_eq!(FhirDate::parse("1986-09").to_string(), "1986-09");
    assert_eq!(FhirDate::default().to_string(), "");
    assert_eq!(FhirDate::parse("1986-09").moment().map(|m| m.to_string()).as_deref(), Some("1986-09-01"));
}

#[test]
fn fallback_values_are_normalized() {
    let date = FhirDate::parse("1986-9-21");
    assert_eq!(date.date(), NaiveDate::from_ymd_opt(1986, 9, 21));
    assert_eq!(date.precision(), None);
    assert_eq!(date.as_json().as_deref(), Some("1986-09-21"));
}
