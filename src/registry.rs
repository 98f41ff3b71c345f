//! Custom validator registry.
//!
//! Rules resolve validator names across three tiers when they are built:
//! the built-in catalog, a [`Registry`] of custom validators, and the
//! rule's private validators. Later tiers shadow earlier ones.

use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde_json::Value;

use crate::arg::Arg;
use crate::assert::Assert;
use crate::error::{ArgumentError, RuleError};

/// A validator: a predicate over the checked value and its bound arguments
/// that reports every condition through the [`Assert`].
pub type Validator =
    Arc<dyn Fn(&Assert<'_>, Option<&Value>, &[Arg]) -> Result<bool, RuleError> + Send + Sync>;

/// Type alias for the validator storage map.
type ValidatorMap = Arc<RwLock<IndexMap<String, Validator>>>;

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// Wraps a closure as a [`Validator`].
///
/// # Example
///
/// ```rust
/// use shiver::{validator, Arg};
///
/// let positive = validator(|assert, value, _args: &[Arg]| {
///     assert.that(value.and_then(|v| v.as_f64()).is_some_and(|n| n > 0.0))
/// });
/// ```
pub fn validator<F>(f: F) -> Validator
where
    F: Fn(&Assert<'_>, Option<&Value>, &[Arg]) -> Result<bool, RuleError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A thread-safe store of custom validators.
///
/// Cloning a `Registry` yields another handle to the same storage. Rules copy
/// the entries they need when they are built, so later registrations and
/// removals never affect rules that already exist.
///
/// [`Registry::global`] is the shared instance used by [`Rule::new`] and
/// [`Rule::build`]; independent registries can be injected with
/// [`Rule::build_in`].
///
/// [`Rule::new`]: crate::Rule::new
/// [`Rule::build`]: crate::Rule::build
/// [`Rule::build_in`]: crate::Rule::build_in
///
/// # Example
///
/// ```rust
/// use shiver::{validator, Arg, Registry};
///
/// let registry = Registry::new();
/// registry
///     .register("nonzero", validator(|assert, value, _args: &[Arg]| {
///         assert.that(value.and_then(|v| v.as_f64()).is_some_and(|n| n != 0.0))
///     }))
///     .unwrap();
///
/// assert!(registry.get("nonzero").is_some());
/// assert!(registry.unregister("nonzero").is_some());
/// assert!(registry.get("nonzero").is_none());
/// ```
pub struct Registry {
    validators: ValidatorMap,
}

impl Registry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            validators: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Returns the process-wide registry.
    ///
    /// Mutating it while other threads build rules is safe, but which
    /// entries a concurrently built rule observes is unspecified.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Installs a validator under `name`, returning the one it replaces.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::EmptyName` or `ArgumentError::ReservedName` if
    /// the name is empty or starts with `$`.
    pub fn register(
        &self,
        name: impl Into<String>,
        validator: Validator,
    ) -> Result<Option<Validator>, ArgumentError> {
        let name = name.into();
        ArgumentError::check_name(&name)?;
        tracing::debug!(validator = %name, "registering custom validator");
        Ok(self.validators.write().insert(name, validator))
    }

    /// Removes the validator registered under `name`, returning it.
    pub fn unregister(&self, name: &str) -> Option<Validator> {
        let removed = self.validators.write().shift_remove(name);
        if removed.is_some() {
            tracing::debug!(validator = %name, "removed custom validator");
        }
        removed
    }

    /// Retrieves the validator registered under `name`.
    pub fn get(&self, name: &str) -> Option<Validator> {
        self.validators.read().get(name).cloned()
    }

    /// Returns true if a validator is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.validators.read().contains_key(name)
    }

    /// Returns the registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.validators.read().keys().cloned().collect()
    }

    /// Returns the number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.read().len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.validators.read().is_empty()
    }

    /// Copies every entry, in registration order.
    pub(crate) fn snapshot(&self) -> Vec<(String, Validator)> {
        self.validators
            .read()
            .iter()
            .map(|(name, v)| (name.clone(), Arc::clone(v)))
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Registry {
    fn clone(&self) -> Self {
        Self {
            validators: Arc::clone(&self.validators),
        }
    }
}

/// Installs or removes a validator in the global registry.
///
/// `Some(validator)` installs it and returns the one it replaced; `None`
/// removes the entry and returns what was removed.
///
/// # Errors
///
/// Returns an `ArgumentError` if an installed name is empty or starts with `$`.
pub fn register_validator(
    name: &str,
    validator: Option<Validator>,
) -> Result<Option<Validator>, ArgumentError> {
    match validator {
        Some(v) => Registry::global().register(name, v),
        None => Ok(Registry::global().unregister(name)),
    }
}

/// Queries the global registry for the validator registered under `name`.
pub fn custom_validator(name: &str) -> Option<Validator> {
    Registry::global().get(name)
}
