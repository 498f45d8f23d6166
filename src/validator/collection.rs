//! Collection validators
//!
//! These apply to leaves declared as `Vec<T>`. For per-element checks that
//! need their own report entries, use [`Validations::add_each`] instead.
//!
//! [`Validations::add_each`]: crate::Validations::add_each

use std::fmt::Display;
use std::ops::RangeBounds;

use super::number::Bounds;
use super::{Validator, Verdict};

/// Checks the number of items in a list.
///
/// ```
/// use sluice::validator::collection;
///
/// let v = collection::count::<String>(1..);
/// assert!(v.validate(&vec!["a".to_string()]).is_pass());
/// assert_eq!(
///     v.validate(&vec![]).failure().map(|f| f.to_string()),
///     Some("is less than minimum of 1 item(s)".to_string())
/// );
/// ```
pub fn count<T: 'static>(range: impl RangeBounds<usize>) -> Validator<Vec<T>> {
    let bounds = Bounds::from_range(range);
    Validator::new(move |items: &Vec<T>| bounds.verdict(&items.len(), " item(s)"))
}

/// Checks that a list is empty.
pub fn empty<T: 'static>() -> Validator<Vec<T>> {
    Validator::from_predicate(|items: &Vec<T>| items.is_empty(), "is empty", "is not empty")
}

/// Applies `validator` to every item, reporting the first one that fails.
///
/// ```
/// use sluice::validator::{collection, number};
///
/// let v = collection::each(number::min(0_i64));
/// assert!(v.validate(&vec![1, 2]).is_pass());
/// assert_eq!(
///     v.validate(&vec![1, -2, -3]).failure().map(|f| f.to_string()),
///     Some("at index 1 is less than minimum of 0".to_string())
/// );
/// ```
pub fn each<T: 'static>(validator: Validator<T>) -> Validator<Vec<T>> {
    Validator::new(move |items: &Vec<T>| {
        for (index, item) in items.iter().enumerate() {
            let verdict = validator.verdict(item);
            if !verdict.holds() {
                return Verdict::new(
                    false,
                    "has only valid items",
                    format!("at index {} {}", index, verdict.description()),
                );
            }
        }
        Verdict::new(true, "has only valid items", "has an invalid item")
    })
}

/// Checks that a value equals one of `choices`.
pub fn one_of<T>(choices: impl IntoIterator<Item = T>) -> Validator<T>
where
    T: PartialEq + Display + Send + Sync + 'static,
{
    let choices: Vec<T> = choices.into_iter().collect();
    let listed = list(&choices);
    Validator::new(move |value: &T| {
        Verdict::new(
            choices.contains(value),
            format!("is {}", listed),
            format!("is not {}", listed),
        )
    })
}

fn list<T: Display>(items: &[T]) -> String {
    let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
    match rendered.as_slice() {
        [] => "any of no values".to_string(),
        [only] => only.clone(),
        [first, second] => format!("{} or {}", first, second),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    }
}
