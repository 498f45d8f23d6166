//! Testing utilities for code that declares validation trees
//!
//! Assertion macros over [`ValidationsResult`] and, behind the `proptest`
//! feature, [`Arbitrary`](proptest::arbitrary::Arbitrary) implementations for
//! outcomes.
//!
//! # Examples
//!
//! ```rust
//! use sluice::{assert_failures, assert_invalid, assert_valid};
//! use sluice::{Outcome, ValidationResult, ValidationsResult};
//!
//! let ok = ValidationsResult::new(vec![ValidationResult::scalar("name", Outcome::Pass)]);
//! assert_valid!(ok);
//!
//! let bad = ValidationsResult::new(vec![ValidationResult::scalar("name", Outcome::fail("is empty"))]);
//! assert_invalid!(bad);
//! assert_failures!(bad, ["name is empty"]);
//! ```

use crate::result::ValidationsResult;

/// Every failure of `report`, rendered as `"path reason"`.
pub fn rendered_failures(report: &ValidationsResult) -> Vec<String> {
    report.failures().iter().map(ToString::to_string).collect()
}

/// Assert that a report has no failures.
///
/// This macro will panic with the rendered failures otherwise.
#[macro_export]
macro_rules! assert_valid {
    ($report:expr) => {{
        let failures = $crate::testing::rendered_failures(&$report);
        if !failures.is_empty() {
            panic!("Expected a valid report, got failures: {:?}", failures);
        }
    }};
}

/// Assert that a report has at least one failure.
#[macro_export]
macro_rules! assert_invalid {
    ($report:expr) => {{
        let report = &$report;
        if $crate::testing::rendered_failures(report).is_empty() {
            panic!("Expected failures, got a valid report: {:?}", report);
        }
    }};
}

/// Assert that a report fails with exactly these rendered failures, in order.
///
/// # Example
///
/// ```rust
/// use sluice::{assert_failures, Failure, Outcome, ValidationResult, ValidationsResult};
///
/// let report = ValidationsResult::new(vec![
///     ValidationResult::scalar("name", Outcome::Fail(Failure::Missing)),
///     ValidationResult::scalar("age", Outcome::Pass),
/// ]);
/// assert_failures!(report, ["name is required"]);
/// ```
#[macro_export]
macro_rules! assert_failures {
    ($report:expr, [$($expected:expr),* $(,)?]) => {{
        let actual = $crate::testing::rendered_failures(&$report);
        let expected: Vec<String> = vec![$(String::from($expected)),*];
        assert_eq!(actual, expected, "failures differ from expected");
    }};
}

#[cfg(feature = "proptest")]
mod arbitrary {
    use proptest::prelude::*;

    use crate::outcome::{Failure, Outcome};

    impl Arbitrary for Failure {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            prop_oneof![
                Just(Failure::Missing),
                Just(Failure::Null),
                "[a-z]{1,8}".prop_map(Failure::type_mismatch),
                "[a-z ]{1,24}".prop_map(Failure::invalid),
            ]
            .boxed()
        }
    }

    impl Arbitrary for Outcome {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            prop_oneof![
                Just(Outcome::Pass),
                Just(Outcome::Skipped),
                any::<Failure>().prop_map(Outcome::Fail),
            ]
            .boxed()
        }
    }
}
