//! Running rule sets against one object.
//!
//! Two modes are available. [`execute`] is fail-fast: rules run in order and
//! the first raised error aborts the run. [`execute_detailed`] runs every rule
//! and collects one [`Outcome`] per path into a [`Report`]; it never fails on
//! account of the rules themselves.

use indexmap::IndexMap;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{ArgumentError, RuleError, ShiverError, ShiverErrors};
use crate::message::{self, Placeholder};
use crate::rule::Rule;
use crate::ValidationResult;

const UNKNOWN_ERROR: &str = "unknown error for path {PATH}";

/// The result of one rule in a detailed run.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Passed,
    Failed(ShiverError),
}

impl Outcome {
    /// Returns true for [`Outcome::Passed`].
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    /// Returns the error of a failed rule.
    pub fn error(&self) -> Option<&ShiverError> {
        match self {
            Outcome::Passed => None,
            Outcome::Failed(e) => Some(e),
        }
    }
}

/// Per-path outcomes of a detailed run, in rule order.
///
/// Rules sharing a path collapse to one entry: the last rule's outcome is
/// kept, at the position where the path first appeared.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report(IndexMap<String, Outcome>);

impl Report {
    /// Returns true if every rule passed.
    pub fn is_success(&self) -> bool {
        self.0.values().all(Outcome::is_passed)
    }

    /// Returns the outcome recorded for `path`.
    pub fn get(&self, path: &str) -> Option<&Outcome> {
        self.0.get(path)
    }

    /// Returns the errors of all failed rules, in rule order.
    pub fn failures(&self) -> impl Iterator<Item = &ShiverError> {
        self.0.values().filter_map(Outcome::error)
    }

    /// Returns the number of recorded paths.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no rule was run.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over `(path, outcome)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Outcome)> {
        self.0.iter().map(|(path, outcome)| (path.as_str(), outcome))
    }

    /// Converts the report into an accumulated validation result.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shiver::{execute_detailed, Rule};
    /// use serde_json::json;
    ///
    /// let mut rules = vec![
    ///     Rule::new("name").existence().message("{PATH} is required"),
    ///     Rule::new("age").int(false).message("{PATH} must be an integer"),
    /// ];
    ///
    /// let report = execute_detailed(&mut rules, &json!({"age": "x"})).unwrap();
    /// let errors = report.into_validation().into_result().unwrap_err();
    /// assert_eq!(errors.len(), 2);
    /// ```
    pub fn into_validation(self) -> ValidationResult<()> {
        let errors: Vec<ShiverError> = self
            .0
            .into_values()
            .filter_map(|outcome| match outcome {
                Outcome::Passed => None,
                Outcome::Failed(e) => Some(e),
            })
            .collect();

        match ShiverErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(()),
        }
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = (&'a String, &'a Outcome);
    type IntoIter = indexmap::map::Iter<'a, String, Outcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The result of [`run`].
#[derive(Debug, Clone, PartialEq)]
pub enum Execution {
    /// Fail-fast mode: whether every rule passed.
    Passed(bool),
    /// Detail mode: the full report.
    Detailed(Report),
}

/// Runs `rules` in order and returns true if all of them pass.
///
/// A rule that fails silently stops the run with `Ok(false)`; a rule that
/// raises stops it with that error.
///
/// # Errors
///
/// Returns `ArgumentError::EmptyPath` if a rule has an empty path, or the
/// first error raised by a rule, unwrapped.
pub fn execute(rules: &mut [Rule], object: &Value) -> Result<bool, RuleError> {
    check_paths(rules)?;
    for rule in rules.iter_mut() {
        if !rule.validate(object)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Runs every rule and records one outcome per rule path.
///
/// Failures never stop the run. A raised [`ShiverError`] is recorded as is.
/// A rule that fails without a message, or that raises any other error,
/// records an `unknown error for path "<path>"` error; for the latter the
/// original is kept in [`ShiverError::original`].
///
/// # Errors
///
/// Returns `ArgumentError::EmptyPath` before running anything if a rule has
/// an empty path.
pub fn execute_detailed(rules: &mut [Rule], object: &Value) -> Result<Report, ArgumentError> {
    check_paths(rules)?;

    let mut outcomes = IndexMap::with_capacity(rules.len());
    for rule in rules.iter_mut() {
        let outcome = match rule.validate(object) {
            Ok(true) => Outcome::Passed,
            Ok(false) => Outcome::Failed(unknown_error(rule)),
            Err(RuleError::Validation(e)) => Outcome::Failed(e),
            Err(other) => Outcome::Failed(unknown_error(rule).with_original(other)),
        };
        if let Outcome::Failed(e) = &outcome {
            tracing::debug!(path = %rule.path(), error = %e, "rule failed");
        }
        outcomes.insert(rule.path().to_string(), outcome);
    }
    Ok(Report(outcomes))
}

/// Runs `rules` in either mode.
///
/// # Errors
///
/// In fail-fast mode, see [`execute`]. In detail mode only argument errors
/// are returned, see [`execute_detailed`].
pub fn run(rules: &mut [Rule], object: &Value, detailed: bool) -> Result<Execution, RuleError> {
    if detailed {
        Ok(Execution::Detailed(execute_detailed(rules, object)?))
    } else {
        execute(rules, object).map(Execution::Passed)
    }
}

fn unknown_error(rule: &Rule) -> ShiverError {
    let message = message::format(UNKNOWN_ERROR, &[("PATH", Placeholder::from(rule.path()))]);
    ShiverError::new(rule.path(), rule.value().cloned(), message)
}

fn check_paths(rules: &[Rule]) -> Result<(), ArgumentError> {
    match rules.iter().position(|rule| rule.path().is_empty()) {
        Some(position) => Err(ArgumentError::EmptyPath(position)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::validator;
    use serde_json::json;

    #[test]
    fn test_execute_empty_rule_set() {
        assert!(execute(&mut [], &json!({})).unwrap());
        assert!(execute_detailed(&mut [], &json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_execute_soft_failure() {
        let mut rules = vec![Rule::new("a").existence(), Rule::new("b").existence()];
        assert!(!execute(&mut rules, &json!({"b": 1})).unwrap());
        assert!(execute(&mut rules, &json!({"a": 1, "b": 1})).unwrap());
    }

    #[test]
    fn test_execute_rejects_empty_path() {
        let mut rules = vec![Rule::new("a"), Rule::new("")];
        assert!(matches!(
            execute(&mut rules, &json!({})),
            Err(RuleError::InvalidArgument(ArgumentError::EmptyPath(1)))
        ));
    }

    #[test]
    fn test_detailed_duplicate_path_keeps_last_outcome() {
        let mut rules = vec![Rule::new("a").truthy(), Rule::new("b"), Rule::new("a")];
        let report = execute_detailed(&mut rules, &json!({"a": 0})).unwrap();
        let paths: Vec<&str> = report.iter().map(|(path, _)| path).collect();
        assert_eq!(paths, vec!["a", "b"]);
        assert_eq!(report.get("a"), Some(&Outcome::Passed));
    }

    #[test]
    fn test_detailed_soft_failure_message() {
        let mut rules = vec![Rule::new("a.b").existence()];
        let report = execute_detailed(&mut rules, &json!({})).unwrap();
        let error = report.get("a.b").and_then(Outcome::error).unwrap();
        assert_eq!(error.message, r#"unknown error for path "a.b""#);
        assert!(error.original.is_none());
    }

    #[test]
    fn test_detailed_wraps_foreign_error() {
        let boom = validator(|_, _, _| Err(RuleError::foreign("boom")));
        let mut rules = vec![Rule::new("x")
            .use_validator("boom", boom)
            .and_then(|rule| rule.check("boom", Vec::new()))
            .unwrap()];

        let report = execute_detailed(&mut rules, &json!({"x": 1})).unwrap();
        let error = report.get("x").and_then(Outcome::error).unwrap();
        assert_eq!(error.value, Some(json!(1)));
        assert_eq!(error.original.as_ref().map(|e| e.to_string()), Some("boom".to_string()));
    }

    #[test]
    fn test_run_modes() {
        let mut rules = vec![Rule::new("a").truthy()];
        assert_eq!(run(&mut rules, &json!({"a": 1}), false).unwrap(), Execution::Passed(true));
        match run(&mut rules, &json!({"a": 0}), true).unwrap() {
            Execution::Detailed(report) => assert!(!report.is_success()),
            other => panic!("expected a report, got {other:?}"),
        }
    }
}
