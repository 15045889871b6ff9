//! Tests for error types

use overlay_lanes::core::LaneError;

#[test]
fn test_empty_name_error() {
    let err = LaneError::EmptyName;
    assert_eq!(format!("{}", err), "lane name cannot be empty");
    assert!(err.is_configuration());
}

#[test]
fn test_already_exists_error() {
    let err = LaneError::AlreadyExists("promos".to_string());
    assert_eq!(format!("{}", err), "lane already exists: promos");
    assert!(err.is_configuration());
}

#[test]
fn test_invalid_config_error() {
    let err = LaneError::InvalidConfig("default_lane cannot be empty".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid configuration: default_lane cannot be empty"
    );
    assert!(err.is_configuration());
}

#[test]
fn test_runtime_errors_are_not_configuration() {
    assert!(!LaneError::Abandoned.is_configuration());
    assert!(!LaneError::Runtime("no reactor".into()).is_configuration());
    assert_eq!(
        format!("{}", LaneError::Abandoned),
        "unit abandoned before presentation"
    );
}
