//! Integration tests for the numeric validators.

use serde_json::{json, Value};
use shiver::validators::number::MAX_SAFE_INTEGER;
use shiver::Rule;

fn check(rule: &mut Rule, value: Value) -> bool {
    rule.validate(&json!({ "v": value })).unwrap()
}

#[test]
fn test_numeric() {
    let mut rule = Rule::new("v").numeric();
    for value in [json!(0), json!(-1.25), json!("3.14"), json!("+7"), json!(".5")] {
        assert!(check(&mut rule, value.clone()), "{value}");
    }
    for value in [json!("1e5"), json!("abc"), json!(""), json!(null), json!([1])] {
        assert!(!check(&mut rule, value.clone()), "{value}");
    }
}

#[test]
fn test_int_and_zeroable() {
    let mut strict = Rule::new("v").int(false);
    let mut zeroable = Rule::new("v").int(true);

    assert!(check(&mut strict, json!(12)));
    assert!(check(&mut strict, json!("-12")));
    assert!(!check(&mut strict, json!("012")));
    assert!(check(&mut zeroable, json!("012")));
    assert!(!check(&mut zeroable, json!("01.2")));
    assert!(!check(&mut strict, json!(12.5)));
}

#[test]
fn test_safe_int_bounds() {
    let mut rule = Rule::new("v").safe_int(false);
    assert!(check(&mut rule, json!(MAX_SAFE_INTEGER)));
    assert!(!check(&mut rule, json!(MAX_SAFE_INTEGER + 1)));
    assert!(check(&mut rule, json!(-MAX_SAFE_INTEGER)));
    assert!(!check(&mut rule, json!(-MAX_SAFE_INTEGER - 1)));
}

#[test]
fn test_safe_int_zeroable() {
    let mut strict = Rule::new("v").safe_int(false);
    let mut zeroable = Rule::new("v").safe_int(true);
    assert!(!check(&mut strict, json!("0042")));
    assert!(check(&mut zeroable, json!("0042")));
}

#[test]
fn test_type_error_message() {
    let mut rule = Rule::new("v").int(false).message("{PATH} must be an integer");
    let error = rule.validate(&json!({"v": true})).unwrap_err();
    assert_eq!(error.to_string(), r#"expected "number" or "string": "v", found "boolean""#);

    let error = rule.validate(&json!({"v": 1.5})).unwrap_err();
    assert_eq!(error.to_string(), r#""v" must be an integer"#);
}

#[test]
fn test_safe_int_out_of_range_raises() {
    let mut rule = Rule::new("v").safe_int(false).message("{VALUE} is not a safe integer");
    let error = rule.validate(&json!({"v": MAX_SAFE_INTEGER + 1})).unwrap_err();
    assert_eq!(error.to_string(), "9007199254740992 is not a safe integer");
}
