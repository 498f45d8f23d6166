//! Per-field outcomes
//!
//! Every leaf of a report ends in an [`Outcome`]. Failures never abort the
//! evaluation of sibling fields; they are collected here and surfaced through
//! the report.

use std::fmt;

/// Why a single field did not pass.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Failure {
    /// A required key was absent from the input.
    Missing,
    /// The key was present but held null for a non-optional type.
    Null,
    /// The value could not be decoded as the declared type.
    TypeMismatch {
        /// Name of the type the field was declared as.
        expected: String,
    },
    /// The value decoded but the validator rejected it.
    Invalid {
        /// Human readable reason produced by the validator.
        reason: String,
    },
}

impl Failure {
    /// Shorthand for a validator rejection.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Failure::Invalid {
            reason: reason.into(),
        }
    }

    /// Shorthand for a decode type mismatch.
    pub fn type_mismatch(expected: impl Into<String>) -> Self {
        Failure::TypeMismatch {
            expected: expected.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Missing => f.write_str("is required"),
            Failure::Null => f.write_str("cannot be null"),
            Failure::TypeMismatch { expected } => write!(f, "is not a(n) {}", expected),
            Failure::Invalid { reason } => f.write_str(reason),
        }
    }
}

/// The result of checking one field.
///
/// # Examples
///
/// ```
/// use sluice::{Failure, Outcome};
///
/// assert!(Outcome::Pass.is_pass());
/// assert!(!Outcome::Skipped.is_failure());
/// assert_eq!(
///     Outcome::fail("is empty").failure(),
///     Some(&Failure::invalid("is empty"))
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "outcome", rename_all = "snake_case"))]
pub enum Outcome {
    /// The field passed.
    Pass,
    /// An optional field was absent; counts as valid.
    Skipped,
    /// The field failed.
    Fail(Failure),
}

impl Outcome {
    /// A validator failure with the given reason.
    pub fn fail(reason: impl Into<String>) -> Self {
        Outcome::Fail(Failure::invalid(reason))
    }

    /// Whether the field passed outright.
    #[inline]
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    /// Whether the field was an absent optional.
    #[inline]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped)
    }

    /// Whether the field failed.
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Fail(_))
    }

    /// The failure, if any.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Fail(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<Failure> for Outcome {
    fn from(failure: Failure) -> Self {
        Outcome::Fail(failure)
    }
}

impl From<Result<(), String>> for Outcome {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Outcome::Pass,
            Err(reason) => Outcome::fail(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_descriptions() {
        assert_eq!(Failure::Missing.to_string(), "is required");
        assert_eq!(Failure::Null.to_string(), "cannot be null");
        assert_eq!(
            Failure::type_mismatch("String").to_string(),
            "is not a(n) String"
        );
        assert_eq!(Failure::invalid("is empty").to_string(), "is empty");
    }

    #[test]
    fn test_skipped_is_not_failure() {
        assert!(!Outcome::Skipped.is_failure());
        assert!(!Outcome::Skipped.is_pass());
        assert!(Outcome::Skipped.is_skipped());
    }

    #[test]
    fn test_from_result() {
        assert_eq!(Outcome::from(Ok(())), Outcome::Pass);
        assert_eq!(
            Outcome::from(Err("too short".to_string())),
            Outcome::fail("too short")
        );
    }
}
