//! Validators: named checks over a single decoded value
//!
//! A [`Validator<T>`] is a pure function from `&T` to a [`Verdict`]. A verdict
//! remembers both the description to use when the value holds and the one to
//! use when it does not, so negating a validator still yields a readable reason.
//!
//! Validators compose with logical operators the same way predicates do:
//!
//! ```rust
//! use sluice::validator::{number, string, Validator};
//!
//! let handle = string::count(3..=16).and(string::alphanumeric());
//! assert!(handle.validate(&"sluice".to_string()).is_pass());
//! assert!(handle.validate(&"no".to_string()).is_failure());
//!
//! let not_blank = !string::empty();
//! assert_eq!(
//!     not_blank.validate(&String::new()).failure().map(|f| f.to_string()),
//!     Some("is empty".to_string())
//! );
//!
//! let adult: Validator<i64> = number::range(18..);
//! assert!(adult.validate(&30).is_pass());
//! ```

pub mod collection;
pub mod number;
pub mod string;

use std::fmt;
use std::ops::Not;
use std::sync::Arc;

use crate::outcome::Outcome;

/// What a validator concluded about one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    holds: bool,
    satisfied: String,
    violated: String,
}

impl Verdict {
    /// Create a verdict with both of its descriptions.
    ///
    /// `satisfied` describes the value when the check holds, `violated` when
    /// it does not. Only the one matching `holds` ends up in a report; the
    /// other is kept for negation.
    pub fn new(holds: bool, satisfied: impl Into<String>, violated: impl Into<String>) -> Self {
        Self {
            holds,
            satisfied: satisfied.into(),
            violated: violated.into(),
        }
    }

    /// Whether the value satisfied the check.
    #[inline]
    pub fn holds(&self) -> bool {
        self.holds
    }

    /// The description that applies given the verdict.
    pub fn description(&self) -> &str {
        if self.holds {
            &self.satisfied
        } else {
            &self.violated
        }
    }

    /// Flip the verdict, swapping its descriptions.
    pub fn negate(self) -> Self {
        Self {
            holds: !self.holds,
            satisfied: self.violated,
            violated: self.satisfied,
        }
    }

    /// Convert into the field outcome that ends up in a report.
    pub fn into_outcome(self) -> Outcome {
        if self.holds {
            Outcome::Pass
        } else {
            Outcome::fail(self.violated)
        }
    }
}

/// A named check over a decoded value of type `T`.
///
/// Cheap to clone and safe to share across threads.
pub struct Validator<T> {
    check: Arc<dyn Fn(&T) -> Verdict + Send + Sync>,
}

impl<T> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
        }
    }
}

impl<T> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("type", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Validator<T> {
    /// Create a validator from a function producing verdicts.
    ///
    /// ```
    /// use sluice::validator::{Validator, Verdict};
    ///
    /// let even = Validator::new(|n: &i64| {
    ///     Verdict::new(n % 2 == 0, "is even", "is odd")
    /// });
    /// assert!(even.validate(&4).is_pass());
    /// assert!(even.validate(&3).is_failure());
    /// ```
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&T) -> Verdict + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
        }
    }

    /// Create a validator from a boolean function and its two descriptions.
    pub fn from_predicate<F>(
        predicate: F,
        satisfied: impl Into<String>,
        violated: impl Into<String>,
    ) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let satisfied = satisfied.into();
        let violated = violated.into();
        Self::new(move |value| Verdict::new(predicate(value), satisfied.clone(), violated.clone()))
    }

    /// A validator every value passes.
    ///
    /// Used for leaves that only assert presence and type.
    pub fn valid() -> Self {
        Self::new(|_| Verdict::new(true, "is valid", "is not valid"))
    }

    /// Run the check and keep the full verdict.
    #[inline]
    pub fn verdict(&self, value: &T) -> Verdict {
        (self.check)(value)
    }

    /// Run the check and return the outcome for a report.
    #[inline]
    pub fn validate(&self, value: &T) -> Outcome {
        self.verdict(value).into_outcome()
    }

    /// Both validators must hold.
    ///
    /// When both fail, the reasons are joined with `and`.
    ///
    /// ```
    /// use sluice::validator::string;
    ///
    /// let v = string::count(5..).and(string::ascii());
    /// assert_eq!(
    ///     v.validate(&"é".to_string()).failure().map(|f| f.to_string()),
    ///     Some("is less than minimum of 5 character(s) and contains a non-ASCII character".to_string())
    /// );
    /// ```
    pub fn and(self, other: Validator<T>) -> Self {
        Self::new(move |value| {
            let left = self.verdict(value);
            let right = other.verdict(value);
            match (left.holds, right.holds) {
                (true, true) => Verdict::new(
                    true,
                    join(&left.satisfied, "and", &right.satisfied),
                    join(&left.violated, "or", &right.violated),
                ),
                (false, true) => Verdict::new(
                    false,
                    join(&left.satisfied, "and", &right.satisfied),
                    left.violated,
                ),
                (true, false) => Verdict::new(
                    false,
                    join(&left.satisfied, "and", &right.satisfied),
                    right.violated,
                ),
                (false, false) => Verdict::new(
                    false,
                    join(&left.satisfied, "and", &right.satisfied),
                    join(&left.violated, "and", &right.violated),
                ),
            }
        })
    }

    /// Either validator must hold.
    pub fn or(self, other: Validator<T>) -> Self {
        Self::new(move |value| {
            let left = self.verdict(value);
            let right = other.verdict(value);
            let satisfied = match (left.holds, right.holds) {
                (true, false) => left.satisfied.clone(),
                (false, true) => right.satisfied.clone(),
                _ => join(&left.satisfied, "or", &right.satisfied),
            };
            Verdict::new(
                left.holds || right.holds,
                satisfied,
                join(&left.violated, "and", &right.violated),
            )
        })
    }

    /// Invert the validator.
    pub fn negate(self) -> Self {
        Self::new(move |value| self.verdict(value).negate())
    }

    /// Replace the failure description with a fixed message.
    ///
    /// ```
    /// use sluice::validator::string;
    ///
    /// let v = string::email().with_failure("must be a work address");
    /// assert_eq!(
    ///     v.validate(&"nope".to_string()).failure().map(|f| f.to_string()),
    ///     Some("must be a work address".to_string())
    /// );
    /// ```
    pub fn with_failure(self, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self::new(move |value| {
            let verdict = self.verdict(value);
            Verdict::new(verdict.holds, verdict.satisfied, reason.clone())
        })
    }

    /// Lift this validator to optional values; `None` always holds.
    ///
    /// ```
    /// use sluice::validator::string;
    ///
    /// let v = string::email().nil_ignoring();
    /// assert!(v.validate(&None).is_pass());
    /// assert!(v.validate(&Some("a@b.io".to_string())).is_pass());
    /// assert!(v.validate(&Some("nope".to_string())).is_failure());
    /// ```
    pub fn nil_ignoring(self) -> Validator<Option<T>> {
        Validator::new(move |value: &Option<T>| match value {
            Some(inner) => self.verdict(inner),
            None => Verdict::new(true, "is null", "is not null"),
        })
    }
}

impl<T: 'static> Not for Validator<T> {
    type Output = Validator<T>;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl<T: 'static> Default for Validator<T> {
    fn default() -> Self {
        Self::valid()
    }
}

/// Checks that an optional value is null.
///
/// Combine with `or` to accept either null or a valid value:
///
/// ```
/// use sluice::validator::{nil, string};
///
/// let v = nil::<String>().or(string::email().nil_ignoring());
/// assert!(v.validate(&None).is_pass());
/// assert!(v.validate(&Some("nope".to_string())).is_failure());
/// ```
pub fn nil<T: 'static>() -> Validator<Option<T>> {
    Validator::from_predicate(|value: &Option<T>| value.is_none(), "is null", "is not null")
}

fn join(left: &str, word: &str, right: &str) -> String {
    format!("{} {} {}", left, word, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positive() -> Validator<i64> {
        Validator::from_predicate(|n| *n > 0, "is positive", "is not positive")
    }

    fn even() -> Validator<i64> {
        Validator::from_predicate(|n| n % 2 == 0, "is even", "is odd")
    }

    fn reason(outcome: Outcome) -> Option<String> {
        outcome.failure().map(|f| f.to_string())
    }

    #[test]
    fn test_valid_always_passes() {
        assert!(Validator::<i64>::valid().validate(&-1).is_pass());
        assert!(Validator::<String>::default()
            .validate(&String::new())
            .is_pass());
    }

    #[test]
    fn test_and_reports_each_failing_side() {
        let v = positive().and(even());
        assert!(v.validate(&4).is_pass());
        assert_eq!(reason(v.validate(&3)), Some("is odd".to_string()));
        assert_eq!(reason(v.validate(&-2)), Some("is not positive".to_string()));
        assert_eq!(
            reason(v.validate(&-3)),
            Some("is not positive and is odd".to_string())
        );
    }

    #[test]
    fn test_or_holds_with_either_side() {
        let v = positive().or(even());
        assert!(v.validate(&3).is_pass());
        assert!(v.validate(&-2).is_pass());
        assert_eq!(
            reason(v.validate(&-3)),
            Some("is not positive and is odd".to_string())
        );
    }

    #[test]
    fn test_not_swaps_descriptions() {
        let v = !positive();
        assert!(v.validate(&-1).is_pass());
        assert_eq!(reason(v.validate(&1)), Some("is positive".to_string()));
    }

    #[test]
    fn test_double_negation_is_identity() {
        let v = positive().negate().negate();
        assert_eq!(v.validate(&1), positive().validate(&1));
        assert_eq!(v.validate(&-1), positive().validate(&-1));
    }

    #[test]
    fn test_with_failure_keeps_verdict() {
        let v = positive().with_failure("must be above zero");
        assert!(v.validate(&1).is_pass());
        assert_eq!(reason(v.validate(&0)), Some("must be above zero".to_string()));
    }

    #[test]
    fn test_nil() {
        let v = nil::<i64>();
        assert!(v.validate(&None).is_pass());
        assert_eq!(reason(v.validate(&Some(1))), Some("is not null".to_string()));
    }

    #[test]
    fn test_nil_ignoring_runs_inner_on_some() {
        let v = positive().nil_ignoring();
        assert!(v.validate(&None).is_pass());
        assert!(v.validate(&Some(1)).is_pass());
        assert!(v.validate(&Some(-1)).is_failure());
    }

    #[test]
    fn test_validator_is_send_sync_and_clone() {
        fn assert_send_sync<T: Send + Sync>(_: &T) {}
        let v = positive();
        assert_send_sync(&v);
        let cloned = v.clone();
        assert_eq!(cloned.validate(&5), v.validate(&5));
    }
}
