//! The report produced by evaluating a tree
//!
//! A [`ValidationsResult`] mirrors the shape of the tree that produced it:
//! one entry per declared validation, in declaration order, with nested
//! objects as `Nested` nodes and per-element checks as `Sequence` nodes.
//!
//! # Examples
//!
//! ```
//! use sluice::{Failure, Outcome, ResultNode, ValidationResult, ValidationsResult};
//!
//! let report = ValidationsResult::new(vec![
//!     ValidationResult::scalar("name", Outcome::Pass),
//!     ValidationResult::nested(
//!         "address",
//!         ValidationsResult::new(vec![ValidationResult::scalar("city", Outcome::fail("is empty"))]),
//!     ),
//! ]);
//!
//! assert!(!report.is_valid());
//! let failures = report.failures();
//! assert_eq!(failures.len(), 1);
//! assert_eq!(failures[0].to_string(), "address.city is empty");
//! ```

use std::fmt;

use crate::key::{ValidationKey, ValidationPath};
use crate::outcome::{Failure, Outcome};

/// What one entry of a report holds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResultNode {
    /// A leaf outcome.
    Scalar(Outcome),
    /// The report of a nested object.
    Nested(ValidationsResult),
    /// One report per array element, in index order.
    Sequence(Vec<ValidationsResult>),
}

impl ResultNode {
    /// Whether every outcome reachable from this node passed or was skipped.
    pub fn is_valid(&self) -> bool {
        match self {
            ResultNode::Scalar(outcome) => !outcome.is_failure(),
            ResultNode::Nested(nested) => nested.is_valid(),
            ResultNode::Sequence(elements) => elements.iter().all(ValidationsResult::is_valid),
        }
    }

    /// The outcome, if this is a leaf.
    pub fn as_outcome(&self) -> Option<&Outcome> {
        match self {
            ResultNode::Scalar(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// The nested report, if this is an object.
    pub fn as_nested(&self) -> Option<&ValidationsResult> {
        match self {
            ResultNode::Nested(nested) => Some(nested),
            _ => None,
        }
    }

    /// The element reports, if this is an array.
    pub fn as_sequence(&self) -> Option<&[ValidationsResult]> {
        match self {
            ResultNode::Sequence(elements) => Some(elements),
            _ => None,
        }
    }

    fn collect_failures(&self, path: &ValidationPath, into: &mut Vec<FieldFailure>) {
        match self {
            ResultNode::Scalar(Outcome::Fail(failure)) => into.push(FieldFailure {
                path: path.clone(),
                failure: failure.clone(),
            }),
            ResultNode::Scalar(_) => {}
            ResultNode::Nested(nested) => nested.collect_failures(path, into),
            ResultNode::Sequence(elements) => {
                for (index, element) in elements.iter().enumerate() {
                    element.collect_failures(&path.child(ValidationKey::Indexed(index)), into);
                }
            }
        }
    }
}

/// One entry of a report.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidationResult {
    /// The key the entry was declared under; `None` for top-level
    /// per-element entries of an array payload.
    pub key: Option<ValidationKey>,
    /// What the entry produced.
    pub node: ResultNode,
}

impl ValidationResult {
    /// A keyed entry.
    pub fn new(key: impl Into<ValidationKey>, node: ResultNode) -> Self {
        Self {
            key: Some(key.into()),
            node,
        }
    }

    /// A leaf entry.
    pub fn scalar(key: impl Into<ValidationKey>, outcome: Outcome) -> Self {
        Self::new(key, ResultNode::Scalar(outcome))
    }

    /// A nested object entry.
    pub fn nested(key: impl Into<ValidationKey>, nested: ValidationsResult) -> Self {
        Self::new(key, ResultNode::Nested(nested))
    }

    /// A per-element entry.
    pub fn sequence(key: impl Into<ValidationKey>, elements: Vec<ValidationsResult>) -> Self {
        Self::new(key, ResultNode::Sequence(elements))
    }

    /// A top-level per-element entry of an array payload.
    pub fn unkeyed(elements: Vec<ValidationsResult>) -> Self {
        Self {
            key: None,
            node: ResultNode::Sequence(elements),
        }
    }
}

/// The ordered report of a whole tree.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ValidationsResult {
    results: Vec<ValidationResult>,
}

impl ValidationsResult {
    /// A report from its entries.
    pub fn new(results: Vec<ValidationResult>) -> Self {
        Self { results }
    }

    /// The report of a tree with nothing to check.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether every reachable outcome passed or was skipped.
    ///
    /// An empty report is valid.
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|result| result.node.is_valid())
    }

    /// Every failing leaf with its path, depth-first in declaration order.
    pub fn failures(&self) -> Vec<FieldFailure> {
        let mut failures = Vec::new();
        self.collect_failures(&ValidationPath::root(), &mut failures);
        failures
    }

    fn collect_failures(&self, path: &ValidationPath, into: &mut Vec<FieldFailure>) {
        for result in &self.results {
            let path = match &result.key {
                Some(key) => path.child(key.clone()),
                None => path.clone(),
            };
            result.node.collect_failures(&path, into);
        }
    }

    /// The first entry declared under `key`.
    pub fn get(&self, key: impl Into<ValidationKey>) -> Option<&ResultNode> {
        let key = key.into();
        self.results
            .iter()
            .find(|result| result.key.as_ref() == Some(&key))
            .map(|result| &result.node)
    }

    /// The entries in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationResult> {
        self.results.iter()
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the report has no entries.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The entries, consuming the report.
    pub fn into_results(self) -> Vec<ValidationResult> {
        self.results
    }

    /// Return the report if it is valid, otherwise its failures as an error.
    ///
    /// ```
    /// use sluice::{Outcome, ValidationResult, ValidationsResult};
    ///
    /// let report = ValidationsResult::new(vec![ValidationResult::scalar("age", Outcome::fail("is too low"))]);
    /// let err = report.assert_valid().unwrap_err();
    /// assert_eq!(err.to_string(), "age is too low");
    /// ```
    pub fn assert_valid(self) -> Result<Self, ValidationsError> {
        let failures = self.failures();
        if failures.is_empty() {
            Ok(self)
        } else {
            Err(ValidationsError { failures })
        }
    }
}

impl<'a> IntoIterator for &'a ValidationsResult {
    type Item = &'a ValidationResult;
    type IntoIter = std::slice::Iter<'a, ValidationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl FromIterator<ValidationResult> for ValidationsResult {
    fn from_iter<I: IntoIterator<Item = ValidationResult>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A failing leaf and where it sits.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldFailure {
    /// Path from the payload root to the field.
    pub path: ValidationPath,
    /// Why it failed.
    pub failure: Failure,
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.failure)
        } else {
            write!(f, "{} {}", self.path, self.failure)
        }
    }
}

/// A report that was expected to pass but did not.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_failures(.failures))]
pub struct ValidationsError {
    /// Every failing leaf, in report order.
    pub failures: Vec<FieldFailure>,
}

fn join_failures(failures: &[FieldFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ValidationsResult {
        ValidationsResult::new(vec![
            ValidationResult::scalar("name", Outcome::Pass),
            ValidationResult::scalar("nickname", Outcome::Skipped),
            ValidationResult::nested(
                "address",
                ValidationsResult::new(vec![ValidationResult::scalar(
                    "city",
                    Outcome::fail("is empty"),
                )]),
            ),
            ValidationResult::sequence(
                "tags",
                vec![
                    ValidationsResult::new(vec![ValidationResult::scalar("value", Outcome::Pass)]),
                    ValidationsResult::new(vec![ValidationResult::scalar(
                        "value",
                        Outcome::Fail(Failure::Missing),
                    )]),
                ],
            ),
        ])
    }

    #[test]
    fn test_empty_report_is_valid() {
        assert!(ValidationsResult::empty().is_valid());
        assert!(ValidationsResult::empty().failures().is_empty());
    }

    #[test]
    fn test_skipped_counts_as_valid() {
        let report = ValidationsResult::new(vec![ValidationResult::scalar("a", Outcome::Skipped)]);
        assert!(report.is_valid());
    }

    #[test]
    fn test_failures_are_depth_first_in_order() {
        let rendered: Vec<String> = sample().failures().iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["address.city is empty", "tags[1].value is required"]
        );
    }

    #[test]
    fn test_unkeyed_entries_do_not_add_a_segment() {
        let report = ValidationsResult::new(vec![ValidationResult::unkeyed(vec![
            ValidationsResult::empty(),
            ValidationsResult::new(vec![ValidationResult::scalar("id", Outcome::fail("is bad"))]),
        ])]);
        let failures = report.failures();
        assert_eq!(failures[0].path.to_string(), "[1].id");
    }

    #[test]
    fn test_get_finds_entries_by_key() {
        let report = sample();
        assert_eq!(
            report.get("name").and_then(ResultNode::as_outcome),
            Some(&Outcome::Pass)
        );
        assert_eq!(report.get("tags").and_then(ResultNode::as_sequence).map(<[_]>::len), Some(2));
        assert!(report.get("missing").is_none());
    }

    #[test]
    fn test_assert_valid_joins_failures() {
        let err = sample().assert_valid().unwrap_err();
        assert_eq!(
            err.to_string(),
            "address.city is empty, tags[1].value is required"
        );
        assert_eq!(err.failures.len(), 2);
    }

    #[test]
    fn test_collects_from_iterator() {
        let report: ValidationsResult = vec![ValidationResult::scalar("a", Outcome::Pass)]
            .into_iter()
            .collect();
        assert_eq!(report.len(), 1);
        assert!(!report.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_failures_serialize_with_rendered_paths() {
        let failures = sample().failures();
        let value = serde_json::to_value(&failures[0]).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "path": "address.city",
                "failure": {"kind": "invalid", "reason": "is empty"}
            })
        );

        let value = serde_json::to_value(&failures[1]).unwrap();
        assert_eq!(value["failure"], serde_json::json!({"kind": "missing"}));
    }
}
