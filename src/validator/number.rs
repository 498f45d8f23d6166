//! Range validators for ordered values
//!
//! The same bounds logic backs character counts and collection sizes, with a
//! unit appended to the descriptions (`character(s)`, `item(s)`).

use std::fmt::Display;
use std::ops::{Bound, RangeBounds};

use super::{Validator, Verdict};

/// Owned copy of a range's two ends.
#[derive(Debug, Clone)]
pub(crate) struct Bounds<T> {
    lower: Bound<T>,
    upper: Bound<T>,
}

impl<T: PartialOrd + Display + Clone> Bounds<T> {
    pub(crate) fn from_range(range: impl RangeBounds<T>) -> Self {
        Self {
            lower: range.start_bound().cloned(),
            upper: range.end_bound().cloned(),
        }
    }

    /// Judge `value` against the bounds; `unit` is appended to descriptions.
    pub(crate) fn verdict(&self, value: &T, unit: &str) -> Verdict {
        let satisfied = self.describe(unit);
        let violation = self
            .incomparable(value)
            .map(|bound| format!("is not comparable to {}{}", bound, unit))
            .or_else(|| match &self.lower {
                Bound::Included(min) if value < min => {
                    Some(format!("is less than minimum of {}{}", min, unit))
                }
                Bound::Excluded(min) if value <= min => {
                    Some(format!("is not greater than {}{}", min, unit))
                }
                _ => None,
            })
            .or_else(|| match &self.upper {
                Bound::Included(max) if value > max => {
                    Some(format!("is greater than maximum of {}{}", max, unit))
                }
                Bound::Excluded(max) if value >= max => {
                    Some(format!("is not less than {}{}", max, unit))
                }
                _ => None,
            });

        match violation {
            Some(violated) => Verdict::new(false, satisfied, violated),
            None => {
                let violated = format!("is not {}", satisfied.trim_start_matches("is "));
                Verdict::new(true, satisfied, violated)
            }
        }
    }

    /// The first bound `value` has no ordering with, such as any bound for NaN.
    fn incomparable(&self, value: &T) -> Option<&T> {
        [&self.lower, &self.upper]
            .into_iter()
            .find_map(|bound| match bound {
                Bound::Included(limit) | Bound::Excluded(limit)
                    if value.partial_cmp(limit).is_none() =>
                {
                    Some(limit)
                }
                _ => None,
            })
    }

    fn describe(&self, unit: &str) -> String {
        let lower = match &self.lower {
            Bound::Included(min) => Some(format!("at least {}", min)),
            Bound::Excluded(min) => Some(format!("greater than {}", min)),
            Bound::Unbounded => None,
        };
        let upper = match &self.upper {
            Bound::Included(max) => Some(format!("at most {}", max)),
            Bound::Excluded(max) => Some(format!("less than {}", max)),
            Bound::Unbounded => None,
        };
        match (lower, upper) {
            (Some(lower), Some(upper)) => format!("is {} and {}{}", lower, upper, unit),
            (Some(bound), None) | (None, Some(bound)) => format!("is {}{}", bound, unit),
            (None, None) => "is any value".to_string(),
        }
    }
}

/// Checks that a value lies within `range`.
///
/// ```
/// use sluice::validator::{number, Validator};
///
/// let age: Validator<i64> = number::range(18..=120);
/// assert!(age.validate(&18).is_pass());
/// assert_eq!(
///     age.validate(&12).failure().map(|f| f.to_string()),
///     Some("is less than minimum of 18".to_string())
/// );
/// ```
pub fn range<T>(range: impl RangeBounds<T>) -> Validator<T>
where
    T: PartialOrd + Display + Clone + Send + Sync + 'static,
{
    let bounds = Bounds::from_range(range);
    Validator::new(move |value| bounds.verdict(value, ""))
}

/// Checks that a value is at least `min`.
pub fn min<T>(min: T) -> Validator<T>
where
    T: PartialOrd + Display + Clone + Send + Sync + 'static,
{
    range(min..)
}

/// Checks that a value is at most `max`.
pub fn max<T>(max: T) -> Validator<T>
where
    T: PartialOrd + Display + Clone + Send + Sync + 'static,
{
    range(..=max)
}
