//! Chainable rules bound to one path.
//!
//! A [`Rule`] is built once for a path and then evaluated against any number
//! of objects. Each chain method appends a [`Check`]; evaluation re-extracts
//! the value at the path and runs the checks in declaration order, stopping
//! at the first one that fails.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;

use crate::arg::Arg;
use crate::assert::Assert;
use crate::error::{ArgumentError, RuleError};
use crate::message::Message;
use crate::path::CompiledPath;
use crate::registry::{Registry, Validator};
use crate::validators::builtins;

/// One configured validator invocation.
#[derive(Clone)]
pub struct Check {
    name: String,
    args: Vec<Arg>,
    message: Option<Message>,
    validator: Validator,
}

impl Check {
    fn new(name: impl Into<String>, args: Vec<Arg>, validator: Validator) -> Self {
        Self {
            name: name.into(),
            args,
            message: None,
            validator,
        }
    }

    /// Returns the validator name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the bound arguments.
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Returns the configured message.
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    fn run(&self, path: &str, value: Option<&Value>) -> Result<bool, RuleError> {
        let assert = Assert::new(path, &self.name, value, &self.args, self.message.as_ref());
        (self.validator)(&assert, value, &self.args)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("name", &self.name)
            .field("args", &self.args)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// A reusable, chainable validation rule bound to one path.
///
/// Validator names resolve when the rule is built, across three tiers:
/// built-ins, then a [`Registry`] of custom validators, then the rule's
/// private validators. A later tier shadows an earlier one for this rule
/// only, and registry changes after the build do not reach it.
///
/// Messages are attached with [`Rule::message`], which applies to the most
/// recently added check. A check without a message fails silently: the
/// rule returns `Ok(false)`. A check with one raises a
/// [`ShiverError`](crate::ShiverError) whose message is the rendered template.
///
/// # Example
///
/// ```rust
/// use shiver::Rule;
/// use serde_json::json;
///
/// let mut rule = Rule::new("user.email")
///     .existence()
///     .message("{PATH} is required")
///     .mail()
///     .message("{VALUE} is not an email address");
///
/// assert!(rule.validate(&json!({"user": {"email": "ada@example.com"}})).unwrap());
///
/// let error = rule.validate(&json!({"user": {}})).unwrap_err();
/// assert_eq!(error.to_string(), r#""user.email" is required"#);
/// ```
#[derive(Clone)]
pub struct Rule {
    path: CompiledPath,
    checks: Vec<Check>,
    value: Option<Value>,
    validators: IndexMap<String, Validator>,
}

impl Rule {
    /// Creates a rule for `path` using the built-ins and the global registry.
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_tiers(path, Registry::global())
    }

    /// Creates a rule for `path` using the global registry and `privates`.
    ///
    /// # Errors
    ///
    /// Returns an `ArgumentError` if a private validator name is empty or
    /// starts with `$`.
    pub fn build<I, K>(path: impl Into<String>, privates: I) -> Result<Self, ArgumentError>
    where
        I: IntoIterator<Item = (K, Validator)>,
        K: Into<String>,
    {
        Self::build_in(path, Registry::global(), privates)
    }

    /// Creates a rule for `path` using `registry` as the custom tier.
    ///
    /// # Errors
    ///
    /// Returns an `ArgumentError` if a private validator name is empty or
    /// starts with `$`.
    pub fn build_in<I, K>(
        path: impl Into<String>,
        registry: &Registry,
        privates: I,
    ) -> Result<Self, ArgumentError>
    where
        I: IntoIterator<Item = (K, Validator)>,
        K: Into<String>,
    {
        Self::with_tiers(path, registry).batch(privates)
    }

    fn with_tiers(path: impl Into<String>, registry: &Registry) -> Self {
        let mut validators: IndexMap<String, Validator> = builtins()
            .iter()
            .map(|(name, v)| (name.to_string(), Arc::clone(v)))
            .collect();
        validators.extend(registry.snapshot());

        Self {
            path: CompiledPath::compile(path),
            checks: Vec::new(),
            value: None,
            validators,
        }
    }

    /// Adds or replaces a validator in this rule's resolution table.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::EmptyName` or `ArgumentError::ReservedName` for
    /// an empty name or one starting with `$`.
    pub fn use_validator(
        mut self,
        name: impl Into<String>,
        validator: Validator,
    ) -> Result<Self, ArgumentError> {
        let name = name.into();
        ArgumentError::check_name(&name)?;
        self.validators.insert(name, validator);
        Ok(self)
    }

    /// Adds every `(name, validator)` pair with [`Rule::use_validator`].
    ///
    /// # Errors
    ///
    /// Stops at the first invalid name.
    pub fn batch<I, K>(self, validators: I) -> Result<Self, ArgumentError>
    where
        I: IntoIterator<Item = (K, Validator)>,
        K: Into<String>,
    {
        validators
            .into_iter()
            .try_fold(self, |rule, (name, v)| rule.use_validator(name, v))
    }

    /// Appends a check using the validator registered under `name`.
    ///
    /// This is the way to chain custom and private validators; built-ins
    /// also have dedicated methods.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::UnknownValidator` if no tier provides `name`.
    pub fn check<I>(mut self, name: &str, args: I) -> Result<Self, ArgumentError>
    where
        I: IntoIterator<Item = Arg>,
    {
        let validator = self
            .validators
            .get(name)
            .cloned()
            .ok_or_else(|| ArgumentError::UnknownValidator(name.to_string()))?;
        self.checks
            .push(Check::new(name, args.into_iter().collect(), validator));
        Ok(self)
    }

    /// Sets the message of the most recently added check.
    ///
    /// Templates may use `{PATH}`, `{VALUE}`, `{NAME}` and `{ARGS}`. Has no
    /// effect before any check has been added.
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        if let Some(last) = self.checks.last_mut() {
            last.message = Some(message.into());
        }
        self
    }

    /// Evaluates every check against the value at this rule's path.
    ///
    /// A rule without checks passes without touching `object`. Otherwise the
    /// extracted value is stored (see [`Rule::value`]) and the checks run in
    /// order until one fails.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the first failing check that has a
    /// message, or any foreign error a validator returned.
    pub fn validate(&mut self, object: &Value) -> Result<bool, RuleError> {
        if self.checks.is_empty() {
            return Ok(true);
        }

        let value = self.path.resolve(object);
        self.value = value.cloned();

        for check in &self.checks {
            tracing::trace!(path = %self.path, validator = %check.name, "running check");
            if !check.run(self.path.as_str(), value)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Returns the path this rule validates.
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Returns the compiled path.
    pub fn resolver(&self) -> &CompiledPath {
        &self.path
    }

    /// Returns the value most recently checked, `None` before the first
    /// evaluation or when the path was absent.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Returns the checks in declaration order.
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Returns true if `name` resolves to a validator for this rule.
    pub fn has_validator(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// Returns the validator `name` resolves to for this rule.
    pub fn validator(&self, name: &str) -> Option<&Validator> {
        self.validators.get(name)
    }

    fn chain(mut self, name: &str, args: Vec<Arg>) -> Self {
        let validator = self.validators.get(name).cloned();
        debug_assert!(validator.is_some(), "built-in validator '{name}' is missing");
        if let Some(validator) = validator {
            self.checks.push(Check::new(name, args, validator));
        }
        self
    }

    /// Value equals `data`.
    pub fn accordance(self, data: impl Into<Value>) -> Self {
        self.chain("accordance", vec![Arg::Value(data.into())])
    }

    /// Value differs from `data`.
    pub fn difference(self, data: impl Into<Value>) -> Self {
        self.chain("difference", vec![Arg::Value(data.into())])
    }

    /// Value is present and not null.
    pub fn existence(self) -> Self {
        self.chain("existence", Vec::new())
    }

    /// `data`, an array or a string, contains the value.
    pub fn inside(self, data: impl Into<Value>) -> Self {
        self.chain("inside", vec![Arg::Value(data.into())])
    }

    /// Value is absent, null, `""` or `[]`.
    pub fn empty(self) -> Self {
        self.chain("empty", Vec::new())
    }

    /// Value is absent, null, `false`, `0` or `""`.
    pub fn falsy(self) -> Self {
        self.chain("falsy", Vec::new())
    }

    /// Value is not falsy.
    pub fn truthy(self) -> Self {
        self.chain("truthy", Vec::new())
    }

    /// Value is a string matching `regex`.
    pub fn matches(self, regex: Regex) -> Self {
        self.chain("matches", vec![Arg::Regex(regex)])
    }

    /// Value is a string starting with `prefix`.
    pub fn starts_with(self, prefix: impl Into<String>) -> Self {
        self.chain("starts_with", vec![Arg::from(prefix.into())])
    }

    /// Value is a string ending with `suffix`.
    pub fn ends_with(self, suffix: impl Into<String>) -> Self {
        self.chain("ends_with", vec![Arg::from(suffix.into())])
    }

    /// Value is a non-empty ASCII string.
    pub fn ascii(self) -> Self {
        self.chain("ascii", Vec::new())
    }

    /// Value is a non-empty string of CJK ideographs.
    pub fn chinese(self) -> Self {
        self.chain("chinese", Vec::new())
    }

    /// Value is 32 lowercase hex digits.
    pub fn md5(self) -> Self {
        self.chain("md5", Vec::new())
    }

    /// Value is a string with no uppercase letters.
    pub fn lowercase(self) -> Self {
        self.chain("lowercase", Vec::new())
    }

    /// Value is a string with no lowercase letters.
    pub fn uppercase(self) -> Self {
        self.chain("uppercase", Vec::new())
    }

    /// Value is an IPv4 or IPv6 address.
    pub fn ip(self) -> Self {
        self.chain("ip", Vec::new())
    }

    /// Value is an IPv4 address.
    pub fn ipv4(self) -> Self {
        self.chain("ip", vec![Arg::from(4_i64)])
    }

    /// Value is an IPv6 address.
    pub fn ipv6(self) -> Self {
        self.chain("ip", vec![Arg::from(6_i64)])
    }

    /// Value is a mainland China mobile number.
    pub fn phone(self) -> Self {
        self.chain("phone", Vec::new())
    }

    /// Value is an email address.
    pub fn mail(self) -> Self {
        self.chain("mail", Vec::new())
    }

    /// Value is a `data:` URI.
    pub fn data_uri(self) -> Self {
        self.chain("data_uri", Vec::new())
    }

    /// Value is padded base64 text.
    pub fn base64(self) -> Self {
        self.chain("base64", Vec::new())
    }

    /// Value is a number or a decimal string.
    pub fn numeric(self) -> Self {
        self.chain("numeric", Vec::new())
    }

    /// Value is an integral number or integer string; `zeroable` allows
    /// leading zeros in strings.
    pub fn int(self, zeroable: bool) -> Self {
        self.chain("int", vec![Arg::from(zeroable)])
    }

    /// Like [`Rule::int`], limited to `±(2^53 - 1)`.
    pub fn safe_int(self, zeroable: bool) -> Self {
        self.chain("safe_int", vec![Arg::from(zeroable)])
    }
}

#[cfg(feature = "temporal")]
impl Rule {
    /// Value falls on the day before now.
    pub fn yesterday(self) -> Self {
        self.chain("yesterday", Vec::new())
    }

    /// Value falls on the day before `reference`.
    pub fn yesterday_from(self, reference: impl Into<Arg>) -> Self {
        self.chain("yesterday", vec![reference.into()])
    }

    /// Value falls within the 24 hours starting now.
    pub fn today(self) -> Self {
        self.chain("today", Vec::new())
    }

    /// Value falls within the 24 hours starting at `reference`.
    pub fn today_from(self, reference: impl Into<Arg>) -> Self {
        self.chain("today", vec![reference.into()])
    }

    /// Value falls on the day after now.
    pub fn tomorrow(self) -> Self {
        self.chain("tomorrow", Vec::new())
    }

    /// Value falls on the day after `reference`.
    pub fn tomorrow_from(self, reference: impl Into<Arg>) -> Self {
        self.chain("tomorrow", vec![reference.into()])
    }

    /// Value is earlier than `reference`.
    pub fn before(self, reference: impl Into<Arg>) -> Self {
        self.chain("before", vec![reference.into()])
    }

    /// Value is earlier than now.
    pub fn before_now(self) -> Self {
        self.chain("before", Vec::new())
    }

    /// Value is later than `reference`.
    pub fn after(self, reference: impl Into<Arg>) -> Self {
        self.chain("after", vec![reference.into()])
    }

    /// Value is later than now.
    pub fn after_now(self) -> Self {
        self.chain("after", Vec::new())
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("path", &self.path.as_str())
            .field("checks", &self.checks)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
