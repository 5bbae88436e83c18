//! Tests for error message quality and actionability
//!
//! Verifies that error messages name the offending field or value.

use devcost::error::{ConfigError, CostError};
use devcost::validation;
use devcost::UsageInputs;

#[test]
fn test_validation_error_message() {
    let mut usage = UsageInputs::default();
    usage.codebuild.duration_minutes = 0;
    let err = validation::validate_usage(&usage).unwrap_err();

    let msg = format!("{}", err);
    assert!(msg.contains("codebuild.duration_minutes"));
    assert!(msg.contains("between 1 and 600"));
}

#[test]
fn test_unknown_environment_message() {
    let err = CostError::UnknownEnvironment("qa".to_string());
    assert_eq!(format!("{}", err), "Unknown environment: qa");
}

#[test]
fn test_config_error_wraps() {
    let err: CostError = ConfigError::InvalidValue {
        field: "pricing.codeguru.lines_per_tier".to_string(),
        reason: "must be at least 1".to_string(),
    }
    .into();

    let msg = format!("{}", err);
    assert!(msg.starts_with("Configuration error:"));
    assert!(msg.contains("lines_per_tier"));
}

#[test]
fn test_duplicate_environment_message() {
    let err = ConfigError::DuplicateEnvironment("Prod".to_string());
    assert!(format!("{}", err).contains("Prod"));
}
