//! String validators

use std::sync::LazyLock;

use regex::Regex;

use super::number::Bounds;
use super::{Validator, Verdict};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9._%+-]+@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,64}$",
    )
    .expect("email pattern compiles")
});

/// Checks that a string is empty.
///
/// Usually negated: `!string::empty()` rejects blank fields with "is empty".
///
/// ```
/// use sluice::validator::string;
///
/// assert!(string::empty().validate(&String::new()).is_pass());
/// assert!((!string::empty()).validate(&"x".to_string()).is_pass());
/// ```
pub fn empty() -> Validator<String> {
    Validator::from_predicate(|s: &String| s.is_empty(), "is empty", "is not empty")
}

/// Checks the number of characters in a string.
///
/// Counts `char`s, not bytes.
///
/// ```
/// use sluice::validator::string;
///
/// let v = string::count(3..=5);
/// assert!(v.validate(&"héllo".to_string()).is_pass());
/// assert_eq!(
///     v.validate(&"hi".to_string()).failure().map(|f| f.to_string()),
///     Some("is less than minimum of 3 character(s)".to_string())
/// );
/// ```
pub fn count(range: impl std::ops::RangeBounds<usize>) -> Validator<String> {
    let bounds = Bounds::from_range(range);
    Validator::new(move |s: &String| bounds.verdict(&s.chars().count(), " character(s)"))
}

/// Checks that a string contains only letters and digits.
pub fn alphanumeric() -> Validator<String> {
    Validator::new(|s: &String| match s.chars().find(|c| !c.is_alphanumeric()) {
        Some(c) => Verdict::new(
            false,
            "contains only alphanumeric characters",
            format!("contains '{}' (allowed: letters and digits)", c),
        ),
        None => Verdict::new(
            true,
            "contains only alphanumeric characters",
            "contains a non-alphanumeric character",
        ),
    })
}

/// Checks that a string is pure ASCII.
pub fn ascii() -> Validator<String> {
    Validator::from_predicate(
        |s: &String| s.is_ascii(),
        "contains only ASCII characters",
        "contains a non-ASCII character",
    )
}

/// Checks that a string looks like an email address.
pub fn email() -> Validator<String> {
    Validator::from_predicate(
        |s: &String| EMAIL.is_match(s),
        "is a valid email address",
        "is not a valid email address",
    )
}

/// Checks that a string is an absolute URL with a host.
///
/// ```
/// use sluice::validator::string;
///
/// assert!(string::url().validate(&"https://example.com/a".to_string()).is_pass());
/// assert!(string::url().validate(&"example.com".to_string()).is_failure());
/// ```
pub fn url() -> Validator<String> {
    Validator::from_predicate(
        |s: &String| {
            ::url::Url::parse(s)
                .map(|parsed| parsed.has_host())
                .unwrap_or(false)
        },
        "is a valid URL",
        "is an invalid URL",
    )
}

/// Checks that a string matches `pattern` somewhere.
///
/// Anchor the pattern with `^` and `$` to match the whole string.
pub fn pattern(pattern: Regex) -> Validator<String> {
    Validator::new(move |s: &String| {
        Verdict::new(
            pattern.is_match(s),
            format!("matches pattern '{}'", pattern.as_str()),
            format!("does not match pattern '{}'", pattern.as_str()),
        )
    })
}

/// Checks that a string equals one of `choices`.
///
/// ```
/// use sluice::validator::string;
///
/// let v = string::one_of(["red", "green"]);
/// assert!(v.validate(&"red".to_string()).is_pass());
/// assert_eq!(
///     v.validate(&"blue".to_string()).failure().map(|f| f.to_string()),
///     Some("is not red or green".to_string())
/// );
/// ```
pub fn one_of<'a>(choices: impl IntoIterator<Item = &'a str>) -> Validator<String> {
    super::collection::one_of(choices.into_iter().map(str::to_string))
}
