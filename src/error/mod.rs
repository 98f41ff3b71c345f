//! Error types for rule construction and evaluation.
//!
//! This module provides [`ShiverError`] for failed checks, [`ShiverErrors`] for
//! accumulating them, [`RuleError`] for anything a rule evaluation can raise and
//! [`ArgumentError`] for malformed configuration.

mod rule_error;
mod shiver_error;

pub use rule_error::{ArgumentError, RuleError};
pub use shiver_error::{ShiverError, ShiverErrors};
