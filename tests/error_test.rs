//! Integration tests for ShiverError, ShiverErrors and RuleError.

use std::error::Error as _;

use serde_json::json;
use shiver::{execute_detailed, ArgumentError, Rule, RuleError, ShiverError, ShiverErrors, ValidationResult};
use stillwater::prelude::*;
use stillwater::Validation;

#[test]
fn test_shiver_error_full_context() {
    let error = ShiverError::new("user.email", Some(json!("not-an-email")), "invalid email format");

    assert_eq!(error.name(), ShiverError::NAME);
    assert_eq!(error.path, "user.email");
    assert_eq!(error.value, Some(json!("not-an-email")));
    assert_eq!(error.message, "invalid email format");
    assert!(error.original.is_none());
}

#[test]
fn test_shiver_errors_never_empty() {
    let errors = ShiverErrors::single(ShiverError::new("a", None, "test error"));

    // is_empty always returns false for ShiverErrors (guarantees at least one error)
    assert!(!errors.is_empty());
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_errors_combine_via_semigroup() {
    let e1 = ShiverErrors::single(ShiverError::new("name", None, "name is required"));
    let e2 = ShiverErrors::single(ShiverError::new("email", None, "email is invalid"));
    let e3 = ShiverErrors::single(ShiverError::new("age", Some(json!(-1)), "age must be positive"));

    let combined = e1.combine(e2).combine(e3);

    assert_eq!(combined.len(), 3);
    let messages: Vec<&str> = combined.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["name is required", "email is invalid", "age must be positive"]);
}

#[test]
fn test_validation_and_accumulates_errors() {
    let v1: ValidationResult<i32> = Validation::Failure(ShiverErrors::single(ShiverError::new("a", None, "error a")));
    let v2: ValidationResult<i32> = Validation::Failure(ShiverErrors::single(ShiverError::new("b", None, "error b")));

    match v1.and(v2) {
        Validation::Failure(errors) => {
            assert_eq!(errors.len(), 2);
            assert_eq!(errors.at_path("a").len(), 1);
            assert_eq!(errors.at_path("b").len(), 1);
        }
        Validation::Success(_) => panic!("Expected failure"),
    }
}

#[test]
fn test_report_into_validation() {
    let mut rules = vec![
        Rule::new("name").existence().message("{PATH} is required"),
        Rule::new("email").mail().message("{PATH} is invalid"),
        Rule::new("age").int(false).message("{PATH} must be an integer"),
    ];

    let report = execute_detailed(&mut rules, &json!({"email": "ada@example.com", "age": "x"})).unwrap();
    let errors = report.into_validation().into_result().unwrap_err();

    let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["name", "age"]);
    assert_eq!(errors.first().message, r#""name" is required"#);
}

#[test]
fn test_passing_report_into_validation() {
    let mut rules = vec![Rule::new("name").existence()];
    let report = execute_detailed(&mut rules, &json!({"name": "Ada"})).unwrap();
    assert!(report.into_validation().is_success());
}

#[test]
fn test_errors_into_vec() {
    let errors = ShiverErrors::single(ShiverError::new("a", None, "error a"))
        .combine(ShiverErrors::single(ShiverError::new("b", None, "error b")));
    let vec = errors.into_vec();

    assert_eq!(vec.len(), 2);
    assert_eq!(vec[1].path, "b");
}

#[test]
fn test_shiver_errors_display() {
    let errors = ShiverErrors::single(ShiverError::new("name", None, "required"))
        .combine(ShiverErrors::single(ShiverError::new("email", None, "invalid")));

    let display = errors.to_string();
    assert!(display.contains("2 error(s)"));
    assert!(display.contains("1. name: required"));
    assert!(display.contains("2. email: invalid"));
}

#[test]
fn test_rule_error_variants() {
    let validation = RuleError::from(ShiverError::new("a", None, "failed"));
    assert!(validation.is_validation());
    assert_eq!(validation.as_validation().map(|e| e.path.as_str()), Some("a"));
    assert_eq!(validation.to_string(), "failed");

    let argument = RuleError::from(ArgumentError::UnknownValidator("nope".to_string()));
    assert!(!argument.is_validation());
    assert_eq!(argument.to_string(), r#"invalid params "name", no validator named 'nope'"#);

    let foreign = RuleError::foreign("socket closed");
    assert!(foreign.as_validation().is_none());
    assert_eq!(foreign.to_string(), "socket closed");
}

#[test]
fn test_wrapped_original_is_error_source() {
    let error = ShiverError::new("x", Some(json!(1)), "unknown error for path \"x\"")
        .with_original(RuleError::foreign("boom"));

    assert_eq!(error.source().map(|e| e.to_string()), Some("boom".to_string()));
    assert_eq!(error.clone(), error);
}

#[test]
fn test_argument_error_messages() {
    assert_eq!(ArgumentError::EmptyName.to_string(), r#"invalid params "name", can not be empty"#);
    assert_eq!(
        ArgumentError::EmptyPath(2).to_string(),
        r#"invalid params "rules", rule at position 2 has an empty path"#
    );
}
