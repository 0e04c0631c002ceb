use std::str::FromStr;

use crate::bike;
use crate::errors::ModelError;
use crate::service_record::{validate_description, ServiceStatus};

#[test]
fn status_round_trips_for_every_literal() {
    for literal in ["pending", "in-progress", "done"] {
        let status = ServiceStatus::from_str(literal).unwrap();
        assert_eq!(status.as_str(), literal);
    }
}

#[test]
fn status_rejects_unknown_spelling() {
    for bad in ["", "Pending", "in_progress", "IN-PROGRESS", "completed", " done"] {
        let err = ServiceStatus::from_str(bad).unwrap_err();
        match err {
            ModelError::Validation(msg) => assert!(msg.contains(&format!("'{bad}'")), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

#[test]
fn status_serializes_as_hyphenated_literal() {
    let json = serde_json::to_string(&ServiceStatus::InProgress).unwrap();
    assert_eq!(json, "\"in-progress\"");
    let back: ServiceStatus = serde_json::from_str("\"done\"").unwrap();
    assert_eq!(back, ServiceStatus::Done);
    assert!(back.is_finished());
    assert!(!ServiceStatus::Pending.is_finished());
}

#[test]
fn description_bounds_are_inclusive() {
    assert!(validate_description(&"a".repeat(9)).is_err());
    assert!(validate_description(&"a".repeat(10)).is_ok());
    assert!(validate_description(&"a".repeat(500)).is_ok());
    assert!(validate_description(&"a".repeat(501)).is_err());
}

#[test]
fn description_counts_characters_not_bytes() {
    // ten two-byte characters
    assert!(validate_description(&"é".repeat(10)).is_ok());
    assert!(validate_description(&"é".repeat(9)).is_err());
}

#[test]
fn year_must_be_positive() {
    assert!(bike::validate_year(2021).is_ok());
    assert!(bike::validate_year(0).is_err());
    assert!(bike::validate_year(-5).is_err());
}
