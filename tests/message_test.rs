//! Integration tests for message templates.

use pretty_assertions::assert_eq;
use serde_json::json;
use shiver::message::{format, render, Placeholder};
use shiver::{Arg, Message, Rule};

#[test]
fn test_format_mixed_placeholders() {
    let value = json!({"key1": "value1", "key8": [1, "2", null]});
    let message = format(
        "{PATH}: {VALUE} ({NAME}) {UNKNOWN}",
        &[
            ("PATH", Placeholder::from("obj.key")),
            ("VALUE", Placeholder::from(Some(&value))),
            ("NAME", Placeholder::from("accordance")),
        ],
    );
    assert_eq!(
        message,
        r#""obj.key": {"key1":"value1","key8":[1,"2",null]} ("accordance") {UNKNOWN}"#
    );
}

#[test]
fn test_render_non_finite_numbers() {
    assert_eq!(render(&Placeholder::Float(f64::NAN)), "NaN");
    assert_eq!(render(&Placeholder::Float(f64::INFINITY)), "Infinity");
    assert_eq!(render(&Placeholder::Float(f64::NEG_INFINITY)), "-Infinity");
    assert_eq!(render(&Placeholder::Arg(Arg::from(f64::NEG_INFINITY))), "-Infinity");
}

#[test]
fn test_template_repeats_placeholders() {
    let mut rule = Rule::new("a").accordance(1).message("{PATH}={VALUE}, not {ARGS}; {PATH}");
    let error = rule.validate(&json!({"a": 2})).unwrap_err();
    assert_eq!(error.to_string(), r#""a"=2, not [1]; "a""#);
}

#[test]
fn test_owned_template() {
    let field = "email";
    let mut rule = Rule::new(field).existence().message(format!("{field} is required ({{PATH}})"));
    let error = rule.validate(&json!({})).unwrap_err();
    assert_eq!(error.to_string(), r#"email is required ("email")"#);
}

#[test]
fn test_generator_sees_raw_path_and_value() {
    let message = Message::generator(|path, value| {
        let len = value.and_then(|v| v.as_array()).map_or(0, Vec::len);
        Some(format!("{path}: {len}"))
    });
    let mut rule = Rule::new("list").empty().message(message);
    let error = rule.validate(&json!({"list": [1, 2, 3]})).unwrap_err();
    assert_eq!(error.to_string(), "list: 3");
}

#[test]
fn test_generator_output_is_a_template() {
    let message = Message::generator(|_, _| Some("{PATH} rejected".to_string()));
    let mut rule = Rule::new("x").falsy().message(message);
    let error = rule.validate(&json!({"x": true})).unwrap_err();
    assert_eq!(error.to_string(), r#""x" rejected"#);
}

#[test]
fn test_integral_float_value_renders_as_integer() {
    let mut rule = Rule::new("n").accordance(4).message("{VALUE} is not {ARGS}");
    let error = rule.validate(&json!({"n": 3.0})).unwrap_err();
    assert_eq!(error.to_string(), "3 is not [4]");
}
