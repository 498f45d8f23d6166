//! Building a validation tree and evaluating it
//!
//! [`Validations`] is an ordered list of [`Validation`] entries plus an
//! ordered list of [`UnkeyedValidation`]s for array payloads. Build it with
//! the `add*` methods, then evaluate it once against a decoder, a request,
//! a query string or a JSON string.
//!
//! Evaluation visits every entry and never stops at the first failing field.
//! Only a structural failure, such as an object where an array was declared,
//! aborts the call.
//!
//! # Examples
//!
//! ```
//! use sluice::validator::{number, string};
//! use sluice::Validations;
//!
//! let mut validations = Validations::new();
//! validations.add("name", !string::empty());
//! validations.add("age", number::range(18_u32..));
//! validations.add_optional("email", string::email());
//! validations.add_nested("address", |address| {
//!     address.add("city", !string::empty());
//! });
//! validations.add_each("pets", |_, pet| {
//!     pet.add("name", string::count(1..=32));
//! });
//!
//! # #[cfg(feature = "json")] {
//! let report = validations
//!     .validate_json(r#"{
//!         "name": "Ada",
//!         "age": 16,
//!         "address": {"city": ""},
//!         "pets": [{"name": "Rex"}, {"name": ""}]
//!     }"#)
//!     .unwrap();
//!
//! assert!(!report.is_valid());
//! let failures: Vec<String> = report.failures().iter().map(ToString::to_string).collect();
//! assert_eq!(failures, vec![
//!     "age is less than minimum of 18",
//!     "address.city is empty",
//!     "pets[1].name is less than minimum of 1 character(s)",
//! ]);
//! # }
//! ```

use std::sync::Arc;

use crate::content::{self, ContentConfiguration, RequestParts};
use crate::decode::{Decode, Decoder, Document, KeyedContainer, UnkeyedContainer};
use crate::error::{Error, Result};
use crate::key::{ValidationKey, ValidationPath};
use crate::outcome::Outcome;
use crate::result::ValidationsResult;
use crate::validation::{leaf_check, UnkeyedValidation, Validation};
use crate::validator::Validator;

/// An ordered tree of field checks.
///
/// Owned outright: nested trees belong to the entry that declares them and
/// per-element trees are built fresh for each element during evaluation.
#[derive(Debug, Default)]
pub struct Validations {
    storage: Vec<Validation>,
    unkeyed_storage: Vec<UnkeyedValidation>,
}

impl Validations {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the tree has any entries at all.
    ///
    /// Trees without entries succeed without decoding anything.
    pub fn has_validations(&self) -> bool {
        !self.storage.is_empty() || !self.unkeyed_storage.is_empty()
    }

    /// The keyed entries in declaration order.
    pub fn entries(&self) -> &[Validation] {
        &self.storage
    }

    /// The per-element entries for array payloads.
    pub fn unkeyed_entries(&self) -> &[UnkeyedValidation] {
        &self.unkeyed_storage
    }

    /// Check the value under `key` as `T`, with an explicit requirement.
    pub fn add_leaf<T: Decode + 'static>(
        &mut self,
        key: impl Into<ValidationKey>,
        validator: Validator<T>,
        required: bool,
    ) {
        self.storage.push(Validation::Leaf {
            key: key.into(),
            required,
            check: leaf_check(validator),
        });
    }

    /// Check the value under `key` as `T`; a missing key fails with "is required".
    pub fn add<T: Decode + 'static>(&mut self, key: impl Into<ValidationKey>, validator: Validator<T>) {
        self.add_leaf(key, validator, true);
    }

    /// Check the value under `key` as `T` if present; a missing key is skipped.
    pub fn add_optional<T: Decode + 'static>(
        &mut self,
        key: impl Into<ValidationKey>,
        validator: Validator<T>,
    ) {
        self.add_leaf(key, validator, false);
    }

    /// Require `key` to be present and decodable as `T`.
    ///
    /// ```
    /// use sluice::Validations;
    ///
    /// let mut validations = Validations::new();
    /// validations.add_type::<u32>("id");
    /// # #[cfg(feature = "json")] {
    /// let report = validations.validate_json(r#"{"id": "seven"}"#).unwrap();
    /// assert_eq!(report.failures()[0].to_string(), "id is not a(n) u32");
    /// # }
    /// ```
    pub fn add_type<T: Decode + 'static>(&mut self, key: impl Into<ValidationKey>) {
        self.add(key, Validator::<T>::valid());
    }

    /// Report `outcome` under `key` without looking at the input.
    ///
    /// Useful for checks that span several fields or need outside state.
    pub fn add_result(&mut self, key: impl Into<ValidationKey>, outcome: Outcome) {
        self.storage.push(Validation::Precomputed {
            key: key.into(),
            outcome,
        });
    }

    /// Check the object under `key` with the entries `compose` adds.
    pub fn add_nested<F>(&mut self, key: impl Into<ValidationKey>, compose: F)
    where
        F: FnOnce(&mut Validations),
    {
        self.add_nested_with(key, true, compose);
    }

    /// Like [`add_nested`](Self::add_nested), but a missing object is skipped.
    pub fn add_nested_optional<F>(&mut self, key: impl Into<ValidationKey>, compose: F)
    where
        F: FnOnce(&mut Validations),
    {
        self.add_nested_with(key, false, compose);
    }

    /// Check the object under `key`, with an explicit requirement.
    pub fn add_nested_with<F>(&mut self, key: impl Into<ValidationKey>, required: bool, compose: F)
    where
        F: FnOnce(&mut Validations),
    {
        let mut validations = Validations::new();
        compose(&mut validations);
        self.storage.push(Validation::NestedKeyed {
            key: key.into(),
            required,
            validations,
        });
    }

    /// Check every element of the array under `key`.
    ///
    /// `builder` is stored and called once per element during evaluation, with
    /// the element's index and a fresh tree to fill in.
    pub fn add_each<F>(&mut self, key: impl Into<ValidationKey>, builder: F)
    where
        F: Fn(usize, &mut Validations) + Send + Sync + 'static,
    {
        self.add_each_with(key, true, builder);
    }

    /// Like [`add_each`](Self::add_each), but a missing array is skipped.
    pub fn add_each_optional<F>(&mut self, key: impl Into<ValidationKey>, builder: F)
    where
        F: Fn(usize, &mut Validations) + Send + Sync + 'static,
    {
        self.add_each_with(key, false, builder);
    }

    /// Check every element of the array under `key`, with an explicit requirement.
    pub fn add_each_with<F>(&mut self, key: impl Into<ValidationKey>, required: bool, builder: F)
    where
        F: Fn(usize, &mut Validations) + Send + Sync + 'static,
    {
        self.storage.push(Validation::NestedEach {
            key: key.into(),
            required,
            builder: Arc::new(builder),
        });
    }

    /// Check every element of a payload that is itself an array.
    ///
    /// When a tree has both per-element entries and keyed entries, only the
    /// per-element entries are evaluated and the keyed ones are ignored.
    pub fn add_unkeyed<F>(&mut self, builder: F)
    where
        F: Fn(usize, &mut Validations) + Send + Sync + 'static,
    {
        self.unkeyed_storage
            .push(UnkeyedValidation::new(Arc::new(builder)));
    }

    /// Evaluate the tree against a decoded payload.
    pub fn validate(&self, decoder: &dyn Decoder<'_>) -> Result<ValidationsResult> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "validate",
            entries = self.storage.len(),
            unkeyed = self.unkeyed_storage.len()
        )
        .entered();

        self.evaluate(decoder, &ValidationPath::root())
    }

    /// Evaluate the tree against a parsed document.
    pub fn validate_document(&self, document: &dyn Document) -> Result<ValidationsResult> {
        if !self.has_validations() {
            return Ok(ValidationsResult::empty());
        }
        self.validate(document.root().as_ref())
    }

    /// Evaluate the tree against a request body.
    ///
    /// The body is decoded with whichever decoder `config` registers for the
    /// request's content type. A tree with no entries returns an empty report
    /// without looking at the request.
    pub fn validate_request(
        &self,
        request: &impl RequestParts,
        config: &ContentConfiguration,
    ) -> Result<ValidationsResult> {
        if !self.has_validations() {
            return Ok(ValidationsResult::empty());
        }
        let document = content::parse_request(request, config)?;
        let root = document.root();
        self.validate(root.as_ref())
    }

    /// Evaluate the tree against a URL query string.
    pub fn validate_query(
        &self,
        query: &str,
        config: &ContentConfiguration,
    ) -> Result<ValidationsResult> {
        if !self.has_validations() {
            return Ok(ValidationsResult::empty());
        }
        let document = content::parse_query(query, config)?;
        let root = document.root();
        self.validate(root.as_ref())
    }

    /// Evaluate the tree against a JSON string.
    #[cfg(feature = "json")]
    pub fn validate_json(&self, json: &str) -> Result<ValidationsResult> {
        if !self.has_validations() {
            return Ok(ValidationsResult::empty());
        }
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|err| crate::decode::DecodeError::DataCorrupted(err.to_string()))?;
        let root = crate::decode::json::JsonDecoder::new(&value);
        self.validate(&root)
    }

    pub(crate) fn evaluate(
        &self,
        decoder: &dyn Decoder<'_>,
        path: &ValidationPath,
    ) -> Result<ValidationsResult> {
        if !self.unkeyed_storage.is_empty() {
            #[cfg(feature = "tracing")]
            if !self.storage.is_empty() {
                tracing::warn!(
                    path = %path,
                    ignored = self.storage.len(),
                    "tree has both per-element and keyed entries; keyed entries are ignored"
                );
            }

            let container = decoder
                .unkeyed()
                .map_err(|source| Error::decode_at(path.clone(), source))?;
            return self.evaluate_unkeyed(container.as_ref(), path);
        }

        if !self.storage.is_empty() {
            let container = decoder
                .keyed()
                .map_err(|source| Error::decode_at(path.clone(), source))?;
            return self.evaluate_keyed(container.as_ref(), path);
        }

        Ok(ValidationsResult::empty())
    }

    pub(crate) fn evaluate_keyed(
        &self,
        container: &dyn KeyedContainer<'_>,
        path: &ValidationPath,
    ) -> Result<ValidationsResult> {
        self.storage
            .iter()
            .map(|validation| validation.run(container, path))
            .collect()
    }

    fn evaluate_unkeyed(
        &self,
        container: &dyn UnkeyedContainer<'_>,
        path: &ValidationPath,
    ) -> Result<ValidationsResult> {
        self.unkeyed_storage
            .iter()
            .map(|validation| validation.run(container, path))
            .collect()
    }
}
