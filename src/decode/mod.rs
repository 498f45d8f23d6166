//! The decoding capability the engine evaluates against
//!
//! The engine never parses bytes. It walks whatever a format adapter hands it
//! through three small interfaces:
//!
//! - [`Decoder`]: one value, which is a scalar or a container
//! - [`KeyedContainer`]: an object-like value, looked up by [`ValidationKey`]
//! - [`UnkeyedContainer`]: an array-like value, looked up by position
//!
//! Every child handed out lives as long as the input (`'de`), so adapters
//! over a borrowed document never copy it.
//!
//! Typed access goes through the [`Decode`] trait, implemented for the usual
//! scalars, `Option<T>` (null decodes to `None`) and `Vec<T>`.
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "json")] {
//! use serde_json::json;
//! use sluice::decode::{json::JsonDecoder, Decoder, KeyedExt};
//!
//! let doc = json!({"name": "Ada", "age": 36});
//! let root = JsonDecoder::new(&doc);
//! let object = root.keyed().unwrap();
//!
//! assert!(object.contains(&"name".into()));
//! assert_eq!(object.decode_scalar::<String>(&"name".into()).unwrap(), "Ada");
//! assert_eq!(object.decode_scalar::<u8>(&"age".into()).unwrap(), 36);
//! # }
//! ```

#[cfg(feature = "json")]
pub mod json;
pub mod query;

mod primitives;

pub use primitives::Decode;

use crate::key::ValidationKey;

/// Why a value or container could not be obtained.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// The value exists but has a different shape or type.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// What the caller asked for.
        expected: String,
        /// What the input holds.
        found: String,
    },
    /// The value is null.
    #[error("expected a value, found null")]
    ValueNotFound,
    /// No member with this key.
    #[error("no value for key '{0}'")]
    KeyNotFound(ValidationKey),
    /// No element at this position.
    #[error("index {index} is out of bounds for {count} element(s)")]
    IndexOutOfBounds {
        /// The requested position.
        index: usize,
        /// How many elements exist.
        count: usize,
    },
    /// The input itself is malformed.
    #[error("data corrupted: {0}")]
    DataCorrupted(String),
}

impl DecodeError {
    /// Shorthand for a type mismatch.
    pub fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        DecodeError::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// A boxed keyed container borrowing from the input.
pub type BoxedKeyed<'de> = Box<dyn KeyedContainer<'de> + 'de>;
/// A boxed unkeyed container borrowing from the input.
pub type BoxedUnkeyed<'de> = Box<dyn UnkeyedContainer<'de> + 'de>;
/// A boxed single-value decoder borrowing from the input.
pub type BoxedDecoder<'de> = Box<dyn Decoder<'de> + 'de>;

/// A single decoded value.
///
/// Scalar accessors fail with [`DecodeError::TypeMismatch`] when the value has
/// another type, and with [`DecodeError::ValueNotFound`] when it is null.
pub trait Decoder<'de> {
    /// Whether the value is null.
    fn is_null(&self) -> bool;

    /// Decode a boolean.
    fn decode_bool(&self) -> Result<bool, DecodeError>;

    /// Decode a signed integer.
    fn decode_i64(&self) -> Result<i64, DecodeError>;

    /// Decode an unsigned integer.
    fn decode_u64(&self) -> Result<u64, DecodeError>;

    /// Decode a floating point number.
    fn decode_f64(&self) -> Result<f64, DecodeError>;

    /// Decode a string.
    fn decode_string(&self) -> Result<String, DecodeError>;

    /// View the value as an object.
    fn keyed(&self) -> Result<BoxedKeyed<'de>, DecodeError>;

    /// View the value as an array.
    fn unkeyed(&self) -> Result<BoxedUnkeyed<'de>, DecodeError>;
}

/// An object-like container.
pub trait KeyedContainer<'de> {
    /// Whether `key` is present. A present key may still hold null.
    fn contains(&self, key: &ValidationKey) -> bool;

    /// The value under `key`.
    fn decoder(&self, key: &ValidationKey) -> Result<BoxedDecoder<'de>, DecodeError>;

    /// The object under `key`.
    fn nested_keyed(&self, key: &ValidationKey) -> Result<BoxedKeyed<'de>, DecodeError> {
        self.decoder(key)?.keyed()
    }

    /// The array under `key`.
    fn nested_unkeyed(&self, key: &ValidationKey) -> Result<BoxedUnkeyed<'de>, DecodeError> {
        self.decoder(key)?.unkeyed()
    }
}

/// An array-like container.
pub trait UnkeyedContainer<'de> {
    /// Number of elements.
    fn count(&self) -> usize;

    /// The element at `index`.
    fn decoder_at(&self, index: usize) -> Result<BoxedDecoder<'de>, DecodeError>;

    /// The object at `index`.
    fn nested_keyed_at(&self, index: usize) -> Result<BoxedKeyed<'de>, DecodeError> {
        self.decoder_at(index)?.keyed()
    }

    /// The array at `index`.
    fn nested_unkeyed_at(&self, index: usize) -> Result<BoxedUnkeyed<'de>, DecodeError> {
        self.decoder_at(index)?.unkeyed()
    }
}

/// Typed lookups on keyed containers.
pub trait KeyedExt<'de>: KeyedContainer<'de> {
    /// Decode the value under `key` as `T`.
    fn decode_scalar<T: Decode>(&self, key: &ValidationKey) -> Result<T, DecodeError> {
        let decoder = self.decoder(key)?;
        T::decode(decoder.as_ref())
    }
}

impl<'de, C: KeyedContainer<'de> + ?Sized> KeyedExt<'de> for C {}

/// Typed lookups on unkeyed containers.
pub trait UnkeyedExt<'de>: UnkeyedContainer<'de> {
    /// Decode the element at `index` as `T`.
    fn decode_scalar_at<T: Decode>(&self, index: usize) -> Result<T, DecodeError> {
        let decoder = self.decoder_at(index)?;
        T::decode(decoder.as_ref())
    }
}

impl<'de, C: UnkeyedContainer<'de> + ?Sized> UnkeyedExt<'de> for C {}

/// A parsed payload that can hand out its root value.
///
/// Implemented by format adapters for their owned document type, so a
/// registry can parse bytes into a `Box<dyn Document>` and the engine can then
/// walk it by reference.
pub trait Document {
    /// The root value of the document.
    fn root(&self) -> BoxedDecoder<'_>;
}
