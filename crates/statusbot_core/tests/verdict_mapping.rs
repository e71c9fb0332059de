use serde_json::json;
use statusbot_core::{map_status, HomeworkRecord, RecoverableError, Verdict};

#[test]
fn each_known_status_maps_to_its_verdict() {
    let cases = [
        ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
        ("reviewing", "Работа взята на проверку ревьюером."),
        ("rejected", "Работа проверена: у ревьюера есть замечания."),
    ];
    for (code, verdict) in cases {
        let message = map_status(&HomeworkRecord::new("hw1", code)).unwrap();
        assert_eq!(message, format!("Changed review status for \"hw1\". {verdict}"));
        assert_eq!(Verdict::from_code(code).map(Verdict::code), Some(code));
    }
}

#[test]
fn unknown_status_is_an_error() {
    let err = map_status(&HomeworkRecord::new("hw1", "pending_unknown")).unwrap_err();
    assert_eq!(
        err,
        RecoverableError::UnknownStatus(Some("pending_unknown".to_string()))
    );
    assert_eq!(err.to_string(), "unknown homework status pending_unknown");
}

#[test]
fn absent_status_is_unknown() {
    let record = HomeworkRecord::from_value(&json!({"homework_name": "hw1"}));
    let err = map_status(&record).unwrap_err();
    assert_eq!(err, RecoverableError::UnknownStatus(None));
    assert_eq!(err.to_string(), "unknown homework status <missing>");
}

#[test]
fn missing_name_is_an_error() {
    let record = HomeworkRecord::from_value(&json!({"status": "approved"}));
    assert_eq!(map_status(&record).unwrap_err(), RecoverableError::MissingName);
}

#[test]
fn status_is_checked_before_name() {
    let err = map_status(&HomeworkRecord::default()).unwrap_err();
    assert_eq!(err, RecoverableError::UnknownStatus(None));
}

#[test]
fn record_given_as_list_uses_first_element() {
    let record = HomeworkRecord::from_value(&json!([
        {"homework_name": "hw3", "status": "rejected"},
        {"homework_name": "hw4", "status": "approved"}
    ]));
    assert_eq!(record, HomeworkRecord::new("hw3", "rejected"));
    assert_eq!(HomeworkRecord::from_value(&json!([])), HomeworkRecord::default());
}

#[test]
fn non_string_status_is_kept_as_text() {
    let record = HomeworkRecord::from_value(&json!({"homework_name": "hw1", "status": 7}));
    assert_eq!(
        map_status(&record).unwrap_err(),
        RecoverableError::UnknownStatus(Some("7".to_string()))
    );
}
