//! Equality, membership, existence, truthiness and pattern validators.

use serde_json::Value;

use crate::arg::Arg;
use crate::assert::Assert;
use crate::error::RuleError;

/// Passes when the value equals the first argument.
pub fn accordance(assert: &Assert<'_>, value: Option<&Value>, args: &[Arg]) -> Result<bool, RuleError> {
    assert.that(same(value, args.first()))
}

/// Passes when the value differs from the first argument.
pub fn difference(assert: &Assert<'_>, value: Option<&Value>, args: &[Arg]) -> Result<bool, RuleError> {
    assert.that(!same(value, args.first()))
}

/// Passes when the value is neither absent nor null.
pub fn existence(assert: &Assert<'_>, value: Option<&Value>, _args: &[Arg]) -> Result<bool, RuleError> {
    assert.that(value.is_some_and(|v| !v.is_null()))
}

/// Passes when the first argument, an array or a string, contains the value.
pub fn inside(assert: &Assert<'_>, value: Option<&Value>, args: &[Arg]) -> Result<bool, RuleError> {
    let data = args.first().and_then(Arg::as_value);
    let container = data.is_some_and(|d| d.is_array() || d.is_string());
    Ok(assert.expect_param(container, &["string", "array"], args.first())?
        && assert.that(contains(data, value))?)
}

/// Passes for absent values, null, `""` and empty arrays.
pub fn empty(assert: &Assert<'_>, value: Option<&Value>, _args: &[Arg]) -> Result<bool, RuleError> {
    match value {
        Some(Value::Array(items)) => assert.that(items.is_empty()),
        other => assert.that(matches!(other, None | Some(Value::Null)) || other.and_then(Value::as_str) == Some("")),
    }
}

/// Passes for falsy values: absent, null, `false`, `0` and `""`.
pub fn falsy(assert: &Assert<'_>, value: Option<&Value>, _args: &[Arg]) -> Result<bool, RuleError> {
    assert.that(is_falsy(value))
}

/// Passes for anything that is not falsy.
pub fn truthy(assert: &Assert<'_>, value: Option<&Value>, _args: &[Arg]) -> Result<bool, RuleError> {
    assert.that(!is_falsy(value))
}

/// Passes when the value is a string matching the pattern argument.
pub fn matches(assert: &Assert<'_>, value: Option<&Value>, args: &[Arg]) -> Result<bool, RuleError> {
    let Some(regex) = args.first().and_then(Arg::as_regex) else {
        return assert.expect_param(false, &["regexp"], args.first());
    };
    match value.and_then(Value::as_str) {
        Some(s) => assert.that(regex.is_match(s)),
        None => assert.expect(false, &["string"]),
    }
}

/// Returns true for values that count as false: absent, null, `false`, `0`
/// and `""`.
pub fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}

fn same(value: Option<&Value>, data: Option<&Arg>) -> bool {
    match (value, data) {
        (None, None) => true,
        (Some(v), Some(Arg::Value(d))) => values_equal(v, d),
        (Some(v), Some(Arg::Number(n))) => v.as_f64() == Some(*n),
        _ => false,
    }
}

/// Numbers compare by magnitude so `1` and `1.0` are equal.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

fn contains(data: Option<&Value>, value: Option<&Value>) -> bool {
    let Some(value) = value else {
        return false;
    };
    match data {
        Some(Value::Array(items)) => items.iter().any(|item| values_equal(item, value)),
        Some(Value::String(haystack)) => match value {
            Value::String(needle) => haystack.contains(needle.as_str()),
            Value::Number(_) | Value::Bool(_) => haystack.contains(&value.to_string()),
            _ => false,
        },
        _ => false,
    }
}
