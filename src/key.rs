//! Field identifiers and report paths
//!
//! A [`ValidationKey`] names one field of the input: either an object member
//! (`Named`) or an array position (`Indexed`). The same key is used to look the
//! field up in a container and to label its entry in the report.
//!
//! # Examples
//!
//! ```
//! use sluice::{ValidationKey, ValidationPath};
//!
//! let key: ValidationKey = "address".into();
//! assert_eq!(key, ValidationKey::Named("address".to_string()));
//!
//! let path = ValidationPath::root().child("tags".into()).child(1.into());
//! assert_eq!(path.to_string(), "tags[1]");
//! ```

use std::fmt;

/// Identifier for a field, either a member name or a position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ValidationKey {
    /// An object member.
    Named(String),
    /// An array element.
    Indexed(usize),
}

impl ValidationKey {
    /// The member name, if this is a named key.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            ValidationKey::Named(name) => Some(name),
            ValidationKey::Indexed(_) => None,
        }
    }

    /// The position, if this is an indexed key.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            ValidationKey::Named(_) => None,
            ValidationKey::Indexed(index) => Some(*index),
        }
    }

    /// The string this key resolves to inside a keyed container.
    ///
    /// Indexed keys look up the member spelled as their decimal index, so
    /// `{"0": ..}` can be addressed with `ValidationKey::Indexed(0)`.
    ///
    /// ```
    /// use sluice::ValidationKey;
    ///
    /// assert_eq!(ValidationKey::from("name").member_name(), "name");
    /// assert_eq!(ValidationKey::from(3).member_name(), "3");
    /// ```
    pub fn member_name(&self) -> std::borrow::Cow<'_, str> {
        match self {
            ValidationKey::Named(name) => std::borrow::Cow::Borrowed(name),
            ValidationKey::Indexed(index) => std::borrow::Cow::Owned(index.to_string()),
        }
    }
}

impl fmt::Display for ValidationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationKey::Named(name) => f.write_str(name),
            ValidationKey::Indexed(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for ValidationKey {
    fn from(name: &str) -> Self {
        ValidationKey::Named(name.to_string())
    }
}

impl From<String> for ValidationKey {
    fn from(name: String) -> Self {
        ValidationKey::Named(name)
    }
}

impl From<usize> for ValidationKey {
    fn from(index: usize) -> Self {
        ValidationKey::Indexed(index)
    }
}

/// The location of a field inside a nested report.
///
/// Rendered with dots between member names and brackets around positions:
/// `address.city`, `tags[1].value`, `[0].name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ValidationPath {
    segments: Vec<ValidationKey>,
}

impl ValidationPath {
    /// The empty path, pointing at the payload itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend this path by one segment.
    pub fn child(&self, key: ValidationKey) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key);
        Self { segments }
    }

    /// The segments from outermost to innermost.
    pub fn segments(&self) -> &[ValidationKey] {
        &self.segments
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for ValidationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                ValidationKey::Indexed(index) => write!(f, "[{}]", index)?,
                ValidationKey::Named(name) if position == 0 => f.write_str(name)?,
                ValidationKey::Named(name) => write!(f, ".{}", name)?,
            }
        }
        Ok(())
    }
}

impl From<Vec<ValidationKey>> for ValidationPath {
    fn from(segments: Vec<ValidationKey>) -> Self {
        Self { segments }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ValidationPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
