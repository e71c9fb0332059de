use serde_json::json;
use statusbot_core::{validate, HomeworkRecord, Payload, RecoverableError};

fn validate_json(value: serde_json::Value) -> Result<Vec<HomeworkRecord>, RecoverableError> {
    validate(&Payload::from_value(value))
}

#[test]
fn envelope_returns_all_records_in_order() {
    let records = validate_json(json!({
        "homeworks": [
            {"homework_name": "hw2", "status": "approved"},
            {"homework_name": "hw1", "status": "rejected"}
        ],
        "current_date": 1700000000
    }))
    .expect("valid payload");

    assert_eq!(
        records,
        vec![
            HomeworkRecord::new("hw2", "approved"),
            HomeworkRecord::new("hw1", "rejected"),
        ]
    );
}

#[test]
fn legacy_array_uses_first_element_as_envelope() {
    let records = validate_json(json!([
        {"homeworks": [{"homework_name": "hw1", "status": "reviewing"}]},
        {"ignored": true}
    ]))
    .expect("valid legacy payload");

    assert_eq!(records, vec![HomeworkRecord::new("hw1", "reviewing")]);
}

#[test]
fn missing_homeworks_key_is_reported() {
    let err = validate_json(json!({"current_date": 1})).unwrap_err();
    assert_eq!(err, RecoverableError::MissingField("homeworks"));
}

#[test]
fn scalar_or_empty_legacy_payload_has_no_homeworks() {
    assert_eq!(
        validate_json(json!("homeworks")).unwrap_err(),
        RecoverableError::MissingField("homeworks")
    );
    assert_eq!(
        validate_json(json!([])).unwrap_err(),
        RecoverableError::MissingField("homeworks")
    );
    assert_eq!(
        validate_json(json!([42])).unwrap_err(),
        RecoverableError::MissingField("homeworks")
    );
}

#[test]
fn empty_list_is_reported() {
    let err = validate_json(json!({"homeworks": []})).unwrap_err();
    assert_eq!(err, RecoverableError::EmptyList);
}

#[test]
fn non_list_homeworks_is_wrong_type() {
    for value in [json!({}), json!("hw1"), json!(3), json!({"homework_name": "hw1"})] {
        let err = validate_json(json!({ "homeworks": value })).unwrap_err();
        assert_eq!(err, RecoverableError::WrongType);
    }
}

#[test]
fn scalar_first_element_is_wrong_element_type() {
    let err = validate_json(json!({"homeworks": ["hw1", {"homework_name": "hw2"}]})).unwrap_err();
    assert_eq!(err, RecoverableError::WrongElementType);
}

#[test]
fn only_first_record_is_checked_in_depth() {
    let records = validate_json(json!({
        "homeworks": [{"homework_name": "hw1", "status": "approved"}, "junk"]
    }))
    .expect("shallow validation accepts later scalars");

    assert_eq!(records.len(), 2);
    assert_eq!(records[1], HomeworkRecord::default());
}

#[test]
fn malformed_body_is_reported() {
    let err = Payload::from_slice(b"<html>502 Bad Gateway</html>").unwrap_err();
    assert!(matches!(err, RecoverableError::MalformedBody(_)));
}

#[test]
fn body_is_decoded_into_tagged_shape() {
    let payload = Payload::from_slice(br#"{"homeworks": []}"#).unwrap();
    assert!(matches!(payload, Payload::Envelope(_)));

    let payload = Payload::from_slice(b"[]").unwrap();
    assert_eq!(payload, Payload::Legacy(Vec::new()));

    let payload = Payload::from_slice(b"null").unwrap();
    assert_eq!(payload, Payload::Other(serde_json::Value::Null));
}
