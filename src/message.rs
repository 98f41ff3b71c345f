//! Message templates and placeholder rendering.
//!
//! A check's message is either a template such as `"{PATH} is required"` or a
//! generator called with the path and value. Templates are rendered with
//! [`format`], which substitutes known `{KEY}` placeholders.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::arg::Arg;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// Type alias for message generator functions.
pub type MessageFn = Arc<dyn Fn(&str, Option<&Value>) -> Option<String> + Send + Sync>;

/// The message attached to a check.
///
/// A generator returning `None` counts as an absent message: the failing
/// check then soft-fails instead of raising.
#[derive(Clone)]
pub enum Message {
    /// A literal template.
    Template(String),
    /// A function of `(path, value)` producing the template.
    Generator(MessageFn),
}

impl Message {
    /// Creates a message from a generator function.
    pub fn generator<F>(f: F) -> Self
    where
        F: Fn(&str, Option<&Value>) -> Option<String> + Send + Sync + 'static,
    {
        Message::Generator(Arc::new(f))
    }

    /// Resolves the message to a template for the given path and value.
    pub fn resolve(&self, path: &str, value: Option<&Value>) -> Option<String> {
        match self {
            Message::Template(t) => Some(t.clone()),
            Message::Generator(f) => f(path, value),
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Template(t) => f.debug_tuple("Template").field(t).finish(),
            Message::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

impl From<&str> for Message {
    fn from(template: &str) -> Self {
        Message::Template(template.to_string())
    }
}

impl From<String> for Message {
    fn from(template: String) -> Self {
        Message::Template(template)
    }
}

/// A value substituted into a template.
#[derive(Debug, Clone)]
pub enum Placeholder {
    /// Nothing is there; renders as `undefined`.
    Absent,
    /// A JSON value; renders as compact JSON.
    Json(Value),
    /// A float; renders `NaN` and `Infinity` as bare tokens.
    Float(f64),
    /// A list of arguments; renders as a JSON array.
    Args(Vec<Arg>),
    /// An argument; renders by its own kind.
    Arg(Arg),
}

impl From<Option<&Value>> for Placeholder {
    fn from(value: Option<&Value>) -> Self {
        value.map_or(Placeholder::Absent, |v| Placeholder::Json(v.clone()))
    }
}

impl From<&str> for Placeholder {
    fn from(value: &str) -> Self {
        Placeholder::Json(Value::String(value.to_string()))
    }
}

impl From<&[Arg]> for Placeholder {
    fn from(args: &[Arg]) -> Self {
        Placeholder::Args(args.to_vec())
    }
}

/// Renders a placeholder the way it appears in a message.
///
/// Integral floats render without a fraction, so `3.0` appears as `3`.
pub fn render(placeholder: &Placeholder) -> String {
    match placeholder {
        Placeholder::Absent => "undefined".to_string(),
        Placeholder::Json(v) => normalize(v.clone()).to_string(),
        Placeholder::Float(n) => render_float(*n),
        Placeholder::Args(args) => normalize(Value::Array(args.iter().map(Arg::to_json).collect())).to_string(),
        Placeholder::Arg(Arg::Number(n)) => render_float(*n),
        Placeholder::Arg(Arg::Regex(r)) => format!("/{}/", r.as_str()),
        Placeholder::Arg(arg) => normalize(arg.to_json()).to_string(),
    }
}

fn render_float(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let token = if n > 0.0 { "Infinity" } else { "-Infinity" };
        token.to_string()
    } else {
        integral(n).map_or_else(|| Value::from(n).to_string(), |i| i.to_string())
    }
}

/// `2^63`, the first float past the `i64` range.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn integral(n: f64) -> Option<i64> {
    (n.fract() == 0.0 && n.abs() < I64_BOUND).then(|| n as i64)
}

fn normalize(value: Value) -> Value {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => integral(f).map_or(Value::Number(n), Value::from),
            _ => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        Value::Object(map) => Value::Object(map.into_iter().map(|(k, v)| (k, normalize(v))).collect()),
        other => other,
    }
}

/// Substitutes `{KEY}` placeholders in `template`.
///
/// Keys missing from `data` are left untouched.
///
/// # Example
///
/// ```rust
/// use shiver::message::{format, Placeholder};
/// use serde_json::json;
///
/// let value = json!("value1");
/// let message = format(
///     "{PATH} {VALUE}",
///     &[("PATH", Placeholder::from("obj.key1")), ("VALUE", Placeholder::from(Some(&value)))],
/// );
///
/// assert_eq!(message, r#""obj.key1" "value1""#);
/// ```
pub fn format(template: &str, data: &[(&str, Placeholder)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let key = &caps[1];
            data.iter()
                .find(|(name, _)| *name == key)
                .map_or_else(|| caps[0].to_string(), |(_, p)| render(p))
        })
        .into_owned()
}
