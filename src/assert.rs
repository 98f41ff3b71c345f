//! The assertion handed to validators.
//!
//! Validators are pure predicates; they report each condition through an
//! [`Assert`], which decides what a false condition means:
//!
//! - `Ok(true)`: the condition held
//! - `Ok(false)`: it failed and no message resolved (soft fail)
//! - `Err(RuleError::Validation(..))`: it failed with a rendered message
//!
//! Composite validators chain conditions with `&&`, so the first false one
//! stops the rest.

use serde_json::Value;

use crate::arg::Arg;
use crate::error::{RuleError, ShiverError};
use crate::message::{format, Message, Placeholder};

/// Per-check assertion context.
///
/// Built fresh for every check invocation from the rule path, the validator
/// name, the checked value, the bound arguments and the configured message.
///
/// # Example
///
/// ```rust
/// use shiver::{validator, Arg, Rule};
/// use serde_json::json;
///
/// let even = validator(|assert, value, _args: &[Arg]| {
///     Ok(assert.expect(value.is_some_and(|v| v.is_i64()), &["integer"])?
///         && assert.that(value.and_then(|v| v.as_i64()).is_some_and(|n| n % 2 == 0))?)
/// });
///
/// let mut rule = Rule::new("n")
///     .use_validator("even", even)
///     .and_then(|rule| rule.check("even", Vec::new()))
///     .unwrap();
/// assert!(rule.validate(&json!({"n": 4})).unwrap());
/// assert!(!rule.validate(&json!({"n": 3})).unwrap());
/// ```
pub struct Assert<'a> {
    path: &'a str,
    name: &'a str,
    value: Option<&'a Value>,
    args: &'a [Arg],
    message: Option<&'a Message>,
}

impl<'a> Assert<'a> {
    /// Creates the assertion context for one check invocation.
    pub fn new(
        path: &'a str,
        name: &'a str,
        value: Option<&'a Value>,
        args: &'a [Arg],
        message: Option<&'a Message>,
    ) -> Self {
        Self {
            path,
            name,
            value,
            args,
            message,
        }
    }

    /// Asserts `ok` using the check's configured message.
    pub fn that(&self, ok: bool) -> Result<bool, RuleError> {
        self.with(ok, self.message)
    }

    /// Asserts `ok` with an explicit message.
    ///
    /// A `None` message, or a generator returning `None`, makes a false
    /// condition a soft fail.
    pub fn with(&self, ok: bool, message: Option<&Message>) -> Result<bool, RuleError> {
        if ok {
            return Ok(true);
        }
        match message.and_then(|m| m.resolve(self.path, self.value)) {
            Some(template) => Err(self.fail(&template).into()),
            None => Ok(false),
        }
    }

    /// Guards the type of the checked value.
    ///
    /// Raises `expected "<types>": {PATH}, found "<type>"` only when the check
    /// was configured with a message; otherwise soft-fails.
    pub fn expect(&self, ok: bool, types: &[&str]) -> Result<bool, RuleError> {
        let message = self.message.map(|_| {
            Message::from(format!(
                "expected \"{}\": {{PATH}}, found \"{}\"",
                types.join("\" or \""),
                value_type_name(self.value)
            ))
        });
        self.with(ok, message.as_ref())
    }

    /// Guards the type of a bound argument.
    ///
    /// Raises `expected params "<types>", give "<type>"` only when the check was
    /// configured with a message; otherwise soft-fails.
    pub fn expect_param(&self, ok: bool, types: &[&str], param: Option<&Arg>) -> Result<bool, RuleError> {
        let message = self.message.map(|_| {
            Message::from(format!(
                "expected params \"{}\", give \"{}\"",
                types.join("\" or \""),
                param.map_or("undefined", Arg::type_name)
            ))
        });
        self.with(ok, message.as_ref())
    }

    /// Returns the rule path.
    pub fn path(&self) -> &str {
        self.path
    }

    /// Returns the validator name.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Returns the checked value.
    pub fn value(&self) -> Option<&'a Value> {
        self.value
    }

    /// Returns the bound arguments.
    pub fn args(&self) -> &'a [Arg] {
        self.args
    }

    /// Returns the configured message.
    pub fn message(&self) -> Option<&'a Message> {
        self.message
    }

    fn fail(&self, template: &str) -> ShiverError {
        let message = format(
            template,
            &[
                ("PATH", Placeholder::from(self.path)),
                ("VALUE", Placeholder::from(self.value)),
                ("NAME", Placeholder::from(self.name)),
                ("ARGS", Placeholder::from(self.args)),
            ],
        );
        ShiverError::new(self.path, self.value.cloned(), message)
    }
}

/// Returns the type name of a checked value as used in generated messages.
pub fn value_type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}
