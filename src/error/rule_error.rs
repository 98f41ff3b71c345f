//! Errors raised while configuring and evaluating rules.

use super::ShiverError;

/// Errors raised by rule evaluation.
///
/// A failing check with a message raises [`RuleError::Validation`]. Validators
/// may also fail for reasons unrelated to the value; those surface as
/// [`RuleError::Foreign`] and are wrapped, not propagated, in detail mode.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// A check failed and its message resolved to text.
    #[error(transparent)]
    Validation(#[from] ShiverError),

    /// Malformed configuration reached evaluation.
    #[error(transparent)]
    InvalidArgument(#[from] ArgumentError),

    /// Any other error raised from inside a validator.
    #[error(transparent)]
    Foreign(Box<dyn std::error::Error + Send + Sync>),
}

impl RuleError {
    /// Wraps an arbitrary error raised from a validator body.
    pub fn foreign(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        RuleError::Foreign(error.into())
    }

    /// Returns the structured error, if this is a validation failure.
    pub fn as_validation(&self) -> Option<&ShiverError> {
        match self {
            RuleError::Validation(e) => Some(e),
            _ => None,
        }
    }

    /// Returns true if this is a validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, RuleError::Validation(_))
    }
}

/// Errors for malformed inputs when building rules, registries or rule sets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    /// Validator names may not be empty.
    #[error("invalid params \"name\", can not be empty")]
    EmptyName,

    /// Names starting with `$` are reserved for rule introspection.
    #[error("invalid params \"name\", can not be starts with char \"$\": {0}")]
    ReservedName(String),

    /// The name is not in the rule's resolution table.
    #[error("invalid params \"name\", no validator named '{0}'")]
    UnknownValidator(String),

    /// Every rule in a rule set needs a non-empty path.
    #[error("invalid params \"rules\", rule at position {0} has an empty path")]
    EmptyPath(usize),
}

impl ArgumentError {
    /// Checks a validator name for registration.
    pub fn check_name(name: &str) -> Result<(), ArgumentError> {
        if name.is_empty() {
            return Err(ArgumentError::EmptyName);
        }
        if name.starts_with('$') {
            return Err(ArgumentError::ReservedName(name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_name() {
        assert!(ArgumentError::check_name("existence").is_ok());
        assert_eq!(ArgumentError::check_name(""), Err(ArgumentError::EmptyName));
        assert_eq!(
            ArgumentError::check_name("$path"),
            Err(ArgumentError::ReservedName("$path".to_string()))
        );
    }

    #[test]
    fn test_reserved_name_message() {
        let error = ArgumentError::ReservedName("$x".to_string());
        assert_eq!(
            error.to_string(),
            "invalid params \"name\", can not be starts with char \"$\": $x"
        );
    }

    #[test]
    fn test_rule_error_conversions() {
        let error: RuleError = ShiverError::new("a", None, "bad").into();
        assert!(error.is_validation());
        assert_eq!(error.as_validation().map(|e| e.path.as_str()), Some("a"));
        assert_eq!(error.to_string(), "bad");

        let error = RuleError::foreign("boom");
        assert!(!error.is_validation());
        assert_eq!(error.to_string(), "boom");

        let error: RuleError = ArgumentError::EmptyName.into();
        assert!(matches!(error, RuleError::InvalidArgument(_)));
    }
}
