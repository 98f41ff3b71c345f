//! Structured validation error types.
//!
//! This module provides [`ShiverError`] for a single failed check and
//! [`ShiverErrors`] for accumulating several of them.

use std::fmt::{self, Display};
use std::sync::Arc;

use serde_json::Value;
use stillwater::prelude::*;

use super::RuleError;

/// The structured error raised by a failing check.
///
/// `ShiverError` captures everything known about the failure:
/// - **path**: the rule path whose value failed
/// - **value**: the value that was checked, `None` when absent
/// - **message**: the rendered, human-readable message
/// - **original**: the foreign error this one wraps, if any
///
/// # Example
///
/// ```rust
/// use shiver::ShiverError;
/// use serde_json::json;
///
/// let error = ShiverError::new("user.email", Some(json!("nope")), "invalid email");
///
/// assert_eq!(error.path, "user.email");
/// assert_eq!(error.to_string(), "invalid email");
/// ```
#[derive(Debug, Clone)]
pub struct ShiverError {
    /// The path of the rule that failed.
    pub path: String,
    /// The value extracted at `path`; `None` when nothing was there.
    pub value: Option<Value>,
    /// Human-readable error message.
    pub message: String,
    /// The unrelated error recovered while executing the rule.
    pub original: Option<Arc<RuleError>>,
}

impl ShiverError {
    /// The name tag carried by every structured error.
    pub const NAME: &'static str = "ShiverError";

    /// Creates a new error for `path` and `value` with the given message.
    pub fn new(path: impl Into<String>, value: Option<Value>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value,
            message: message.into(),
            original: None,
        }
    }

    /// Attaches the error this one wraps and returns self for chaining.
    pub fn with_original(mut self, original: RuleError) -> Self {
        self.original = Some(Arc::new(original));
        self
    }

    /// Returns the name tag, always `"ShiverError"`.
    pub fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl PartialEq for ShiverError {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
            && self.value == other.value
            && self.message == other.message
            && self.original.is_some() == other.original.is_some()
    }
}

impl Display for ShiverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ShiverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.original
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ShiverError>();
    assert_sync::<ShiverError>();
};

/// A non-empty collection of structured errors.
///
/// `ShiverErrors` wraps a `NonEmptyVec<ShiverError>` so a failed report always
/// carries at least one error. It implements `Semigroup`, so collections from
/// separate runs can be combined:
///
/// ```rust
/// use shiver::{ShiverError, ShiverErrors};
/// use stillwater::prelude::*;
///
/// let a = ShiverErrors::single(ShiverError::new("name", None, "required"));
/// let b = ShiverErrors::single(ShiverError::new("email", None, "invalid"));
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ShiverErrors(NonEmptyVec<ShiverError>);

impl ShiverErrors {
    /// Creates a collection holding one error.
    pub fn single(error: ShiverError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a collection from a vec, or `None` if the vec is empty.
    pub fn from_vec(errors: Vec<ShiverError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &ShiverError> {
        self.0.iter()
    }

    /// Returns all errors raised for `path`.
    pub fn at_path(&self, path: &str) -> Vec<&ShiverError> {
        self.0.iter().filter(|e| e.path == path).collect()
    }

    /// Returns the first error.
    pub fn first(&self) -> &ShiverError {
        self.0.head()
    }

    /// Converts the collection into a `Vec<ShiverError>`.
    pub fn into_vec(self) -> Vec<ShiverError> {
        self.0.into_vec()
    }
}

impl Semigroup for ShiverErrors {
    fn combine(self, other: Self) -> Self {
        ShiverErrors(self.0.combine(other.0))
    }
}

impl Display for ShiverErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}: {}", i + 1, error.path, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ShiverErrors {}

impl IntoIterator for ShiverErrors {
    type Item = ShiverError;
    type IntoIter = std::vec::IntoIter<ShiverError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}
