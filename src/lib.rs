//! # Shiver
//!
//! A declarative field-validation engine for JSON-like data.
//!
//! ## Overview
//!
//! A [`Rule`] targets one path inside an object, such as `user.emails.0`,
//! and carries a chain of named checks. Evaluating the rule extracts the
//! value at the path and runs the checks in order, stopping at the first
//! failure. Rules are reusable across objects.
//!
//! Each check is a [`Validator`]: a predicate that reports its conditions
//! through an [`Assert`]. A failing condition raises a [`ShiverError`] when
//! the check has a message, and fails silently otherwise.
//!
//! Validator names resolve across three tiers when a rule is built: the
//! built-in catalog, a [`Registry`] of custom validators, and validators
//! private to the rule.
//!
//! Rule sets run either fail-fast with [`execute`] or collecting a per-path
//! [`Report`] with [`execute_detailed`].
//!
//! ## Core Types
//!
//! - [`Rule`]: chainable checks bound to a path
//! - [`CompiledPath`]: dotted path lookup into a `serde_json::Value`
//! - [`Registry`]: thread-safe store of custom validators
//! - [`ShiverError`]: a failed check with path, value and rendered message
//! - [`Report`]: ordered per-path outcomes of a detailed run
//!
//! ## Example
//!
//! ```rust
//! use shiver::{execute, execute_detailed, Rule};
//! use serde_json::json;
//!
//! let mut rules = vec![
//!     Rule::new("user.name").existence().message("{PATH} is required"),
//!     Rule::new("user.email").mail().message("{VALUE} is not an email address"),
//! ];
//!
//! let object = json!({"user": {"name": "Ada", "email": "ada@example.com"}});
//! assert!(execute(&mut rules, &object).unwrap());
//!
//! let report = execute_detailed(&mut rules, &json!({"user": {"email": "nope"}})).unwrap();
//! assert!(!report.is_success());
//! assert_eq!(report.failures().count(), 2);
//! ```

pub mod arg;
pub mod assert;
pub mod error;
pub mod executor;
pub mod message;
pub mod path;
pub mod registry;
pub mod rule;
pub mod validators;

pub use arg::Arg;
pub use assert::Assert;
pub use error::{ArgumentError, RuleError, ShiverError, ShiverErrors};
pub use executor::{execute, execute_detailed, run, Execution, Outcome, Report};
pub use message::Message;
pub use path::{CompiledPath, PathSegment};
pub use registry::{custom_validator, register_validator, validator, Registry, Validator};
pub use rule::{Check, Rule};

/// Type alias for accumulated validation results using ShiverErrors
pub type ValidationResult<T> = stillwater::Validation<T, ShiverErrors>;
