use fhirdate::{FhirDate, FhirDateError, Settings};
use serde::{Deserialize, Serialize};
use serde_json::json;

fn legacy() -> Settings {
    Settings { legacy_epoch_seconds: true, ..Settings::default() }
}

#[test]
fn strings_and_null_are_accepted() {
    let settings = Settings::default();
    let date = FhirDate::from_json(&json!("2013-01-01T10:50Z"), &settings).expect("string is fine");
    assert_eq!(date.as_json().as_deref(), Some("2013-01-01T10:50Z"));

    let date = FhirDate::from_json(&json!(null), &settings).expect("null is fine");
    assert!(date.is_empty());

    // bad content is not a type error
    let date = FhirDate::from_json(&json!("1986-21-21"), &settings).expect("still a string");
    assert!(date.is_empty());
}

#[test]
fn structurally_wrong_input_is_rejected() {
    let settings = Settings::default();
    let cases = [
        (json!({"key1": "value1"}), "object"),
        (json!(["1986"]), "array"),
        (json!(true), "boolean"),
        (json!(1.5), "number"),
        (json!(123), "integer"),
    ];
    for (value, kind) in cases {
        match FhirDate::from_json(&value, &settings) {
            Err(FhirDateError::TypeKind { expected, received }) => {
                assert_eq!(expected, "string or datetime");
                assert_eq!(received, kind);
            }
            other => panic!("{value} should be a type error, got {other:?}"),
        }
    }
    let err = FhirDate::from_json(&json!({"key1": "value1"}), &settings).unwrap_err();
    assert_eq!(err.to_string(), "Expecting string or datetime when initializing FhirDate, but got object");
}

#[test]
fn integers_are_epoch_seconds_in_legacy_mode() {
    let date = FhirDate::from_json(&json!(1_000_000_000), &legacy()).expect("legacy integer");
    assert_eq!(date.as_json().as_deref(), Some("2001-09-09T01:46:40"));
    assert_eq!(date.precision(), None);

    // floats stay rejected
    assert!(FhirDate::from_json(&json!(1.5), &legacy()).is_err());
}

#[test]
fn lists_map_element_wise() {
    let settings = Settings::default();
    let dates = FhirDate::from_json_list(&json!(["1986", null, "1986-W20-5", "1986-21-21"]), &settings).expect("all strings");
    let written: Vec<Option<String>> = dates.iter().map(FhirDate::as_json).collect();
    assert_eq!(
        written,
        vec![Some("1986".to_string()), None, Some("1986-W20-5".to_string()), None]
    );

    let single = FhirDate::from_json_list(&json!("1986-09"), &settings).expect("single string");
    assert_eq!(single.len(), 1);

    assert!(FhirDate::from_json_list(&json!(["1986", {"a": 1}]), &settings).is_err());
    assert!(FhirDate::from_json_list(&json!([["1986"]]), &settings).is_err());
}

#[derive(Serialize, Deserialize)]
struct Patient {
    #[serde(rename = "birthDate")]
    birth_date: FhirDate,
    #[serde(default, rename = "deceasedDateTime")]
    deceased: Option<FhirDate>,
}

#[test]
fn serde_writes_the_original_text() {
    let text = r#"{"birthDate":"1986-09","deceasedDateTime":"2015-02-09T11:04:15.817-05:00"}"#;
    let patient: Patient = serde_json::from_str(text).expect("valid patient");
    assert_eq!(patient.birth_date.date(), chrono::NaiveDate::from_ymd_opt(1986, 9, 1));
    assert_eq!(serde_json::to_string(&patient).unwrap(), text);
}

#[test]
fn serde_writes_null_for_empty_values() {
    let patient: Patient = serde_json::from_str(r#"{"birthDate":"1986-21-21"}"#).expect("bad content is tolerated");
    assert!(patient.birth_date.is_empty());
    assert!(patient.deceased.is_none());
    assert_eq!(serde_json::to_string(&patient).unwrap(), r#"{"birthDate":null,"deceasedDateTime":null}"#);
}

#[test]
fn serde_rejects_structural_mismatches() {
    let err = serde_json::from_str::<Patient>(r#"{"birthDate":{"key":"value"}}"#).err().expect("map is not a date");
    assert!(err.to_string().contains("expected string or datetime"), "{err}");

    assert!(serde_json::from_str::<Patient>(r#"{"birthDate":123}"#).is_err());
    assert!(serde_json::from_str::<Patient>(r#"{"birthDate":["1986"]}"#).is_err());
}

#[test]
fn integers_beyond_i64_follow_the_legacy_mode() {
    match FhirDate::from_json(&json!(u64::MAX), &Settings::default()) {
        Err(FhirDateError::TypeKind { received, .. }) => assert_eq!(received, "integer"),
        other => panic!("expected a type error, got {other:?}"),
    }
    let date = FhirDate::from_json(&json!(u64::MAX), &legacy()).expect("legacy integer is well typed");
    assert!(date.is_empty());
    assert_eq!(date.as_json(), None);
}
