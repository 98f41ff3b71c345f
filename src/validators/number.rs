//! Numeric validators.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};

use crate::arg::Arg;
use crate::assert::Assert;
use crate::error::RuleError;

/// The largest integer a double represents exactly, `2^53 - 1`.
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").unwrap());
static INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-+]?(0|[1-9][0-9]*)$").unwrap());
static INT_LEADING_ZEROES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-+]?[0-9]+$").unwrap());

/// Passes for numbers and for strings holding a decimal number.
pub fn numeric(assert: &Assert<'_>, value: Option<&Value>, _args: &[Arg]) -> Result<bool, RuleError> {
    match value {
        Some(Value::Number(n)) => assert.that(n.as_f64().is_some_and(is_numeric_f64)),
        Some(Value::String(s)) => assert.that(is_numeric_str(s)),
        _ => assert.expect(false, &["number", "string"]),
    }
}

/// Passes for integral numbers and integer strings.
///
/// A `true` argument lets strings carry leading zeros, as in `"007"`.
pub fn int(assert: &Assert<'_>, value: Option<&Value>, args: &[Arg]) -> Result<bool, RuleError> {
    let zeroable = args.first().and_then(Arg::as_bool).unwrap_or(false);
    match value {
        Some(Value::Number(n)) => assert.that(is_integral(n)),
        Some(Value::String(s)) => assert.that(is_int_str(s, zeroable)),
        _ => assert.expect(false, &["number", "string"]),
    }
}

/// Passes for integers that `int` accepts and that lie within
/// `±MAX_SAFE_INTEGER`.
pub fn safe_int(assert: &Assert<'_>, value: Option<&Value>, args: &[Arg]) -> Result<bool, RuleError> {
    Ok(int(assert, value, args)? && assert.that(value.is_some_and(is_safe))?)
}

/// Returns true for finite numbers and positive infinity.
pub fn is_numeric_f64(n: f64) -> bool {
    n.is_finite() || n == f64::INFINITY
}

/// Returns true for strings such as `"12"`, `"-0.5"` and `".5"`.
pub fn is_numeric_str(s: &str) -> bool {
    NUMERIC.is_match(s)
}

/// Returns true for integer strings; leading zeros only when `zeroable`.
pub fn is_int_str(s: &str, zeroable: bool) -> bool {
    if zeroable {
        INT_LEADING_ZEROES.is_match(s)
    } else {
        INT.is_match(s)
    }
}

fn is_integral(n: &Number) -> bool {
    n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}

fn is_safe(value: &Value) -> bool {
    let limit = MAX_SAFE_INTEGER as f64;
    match value {
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&i),
            (None, Some(u)) => u <= MAX_SAFE_INTEGER as u64,
            (None, None) => n.as_f64().is_some_and(|f| f.abs() <= limit),
        },
        Value::String(s) => s
            .trim_start_matches('+')
            .parse::<i128>()
            .is_ok_and(|i| i.abs() <= i128::from(MAX_SAFE_INTEGER)),
        _ => false,
    }
}
