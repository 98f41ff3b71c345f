//! Arguments bound to a check at chain-construction time.

use regex::Regex;
use serde_json::Value;

#[cfg(feature = "temporal")]
use chrono::{DateTime, SecondsFormat, Utc};

/// A configured validator argument.
///
/// Most arguments are plain JSON values. The other variants carry things JSON
/// cannot: non-finite floats, compiled patterns and instants.
#[derive(Debug, Clone)]
pub enum Arg {
    /// Any JSON value.
    Value(Value),
    /// A float that may be NaN or infinite.
    Number(f64),
    /// A compiled regular expression.
    Regex(Regex),
    /// A point in time.
    #[cfg(feature = "temporal")]
    Date(DateTime<Utc>),
}

impl Arg {
    /// Returns the JSON value, if this argument is one.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Arg::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the argument as a string slice, if it is a JSON string.
    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    /// Returns the compiled pattern, if this argument is one.
    pub fn as_regex(&self) -> Option<&Regex> {
        match self {
            Arg::Regex(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the argument as a float, for both JSON numbers and raw floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Arg::Number(n) => Some(*n),
            Arg::Value(v) => v.as_f64(),
            _ => None,
        }
    }

    /// Returns the argument as a boolean, if it is a JSON boolean.
    pub fn as_bool(&self) -> Option<bool> {
        self.as_value().and_then(Value::as_bool)
    }

    /// Returns the instant, if this argument is one.
    #[cfg(feature = "temporal")]
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Arg::Date(d) => Some(d),
            _ => None,
        }
    }

    /// Converts the argument into the JSON form used by message templates.
    ///
    /// Non-finite floats become `null` and patterns become their source text.
    pub fn to_json(&self) -> Value {
        match self {
            Arg::Value(v) => v.clone(),
            Arg::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Arg::Regex(r) => Value::String(r.as_str().to_string()),
            #[cfg(feature = "temporal")]
            Arg::Date(d) => Value::String(d.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    /// Returns the type name reported in "expected params" messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Arg::Value(v) => crate::assert::value_type_name(Some(v)),
            Arg::Number(n) if n.is_nan() => "NaN",
            Arg::Number(n) if n.is_infinite() => "Infinity",
            Arg::Number(_) => "number",
            Arg::Regex(_) => "regexp",
            #[cfg(feature = "temporal")]
            Arg::Date(_) => "date",
        }
    }
}

impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Arg::Value(a), Arg::Value(b)) => a == b,
            (Arg::Number(a), Arg::Number(b)) => a == b,
            (Arg::Regex(a), Arg::Regex(b)) => a.as_str() == b.as_str(),
            #[cfg(feature = "temporal")]
            (Arg::Date(a), Arg::Date(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Value(Value::String(value.to_string()))
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Value(Value::String(value))
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Value(Value::Bool(value))
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Value(Value::from(value))
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Number(value)
    }
}

impl From<Regex> for Arg {
    fn from(value: Regex) -> Self {
        Arg::Regex(value)
    }
}

#[cfg(feature = "temporal")]
impl From<DateTime<Utc>> for Arg {
    fn from(value: DateTime<Utc>) -> Self {
        Arg::Date(value)
    }
}
