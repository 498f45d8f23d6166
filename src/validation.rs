//! Entries of a validation tree and how each one runs
//!
//! A [`Validation`] is one declared check under one key. Evaluating it
//! against a keyed container yields exactly one [`ValidationResult`], except
//! when a nested container cannot be obtained at all, which aborts the whole
//! call with [`Error::Decode`].

use std::fmt;
use std::sync::Arc;

use crate::decode::{Decode, DecodeError, Decoder, KeyedContainer, UnkeyedContainer};
use crate::error::{Error, Result};
use crate::key::{ValidationKey, ValidationPath};
use crate::outcome::{Failure, Outcome};
use crate::result::{ValidationResult, ValidationsResult};
use crate::validations::Validations;
use crate::validator::Validator;

/// Builds the sub-tree for one array element, given its index.
pub type ElementBuilder = Arc<dyn Fn(usize, &mut Validations) + Send + Sync>;

/// A type-erased "decode as `T`, then validate" step.
///
/// The declared type is fixed where the leaf is added; evaluation only sees
/// this interface.
pub trait LeafCheck: Send + Sync {
    /// Decode the value and judge it.
    fn check(&self, decoder: &dyn Decoder<'_>) -> Outcome;

    /// Name of the declared type, for diagnostics.
    fn type_name(&self) -> String;
}

struct TypedLeaf<T> {
    validator: Validator<T>,
}

impl<T: Decode + 'static> LeafCheck for TypedLeaf<T> {
    fn check(&self, decoder: &dyn Decoder<'_>) -> Outcome {
        match T::decode(decoder) {
            Ok(value) => self.validator.validate(&value),
            Err(DecodeError::ValueNotFound) => Outcome::Fail(Failure::Null),
            Err(_) => Outcome::Fail(Failure::type_mismatch(T::type_name())),
        }
    }

    fn type_name(&self) -> String {
        T::type_name()
    }
}

/// Erase a typed validator into a leaf check.
pub(crate) fn leaf_check<T: Decode + 'static>(validator: Validator<T>) -> Box<dyn LeafCheck> {
    Box::new(TypedLeaf { validator })
}

/// One entry of a validation tree.
pub enum Validation {
    /// Decode the value under `key` and run a validator on it.
    Leaf {
        /// Field to check.
        key: ValidationKey,
        /// Whether absence is a failure.
        required: bool,
        /// The typed check.
        check: Box<dyn LeafCheck>,
    },
    /// Report a result that was computed without looking at the input.
    Precomputed {
        /// Field the result is reported under.
        key: ValidationKey,
        /// The result to report.
        outcome: Outcome,
    },
    /// Evaluate a sub-tree against the object under `key`.
    NestedKeyed {
        /// Field holding the object.
        key: ValidationKey,
        /// Whether absence is a failure.
        required: bool,
        /// Checks for the object's members.
        validations: Validations,
    },
    /// Evaluate a freshly built sub-tree against each element of the array
    /// under `key`.
    NestedEach {
        /// Field holding the array.
        key: ValidationKey,
        /// Whether absence is a failure.
        required: bool,
        /// Called once per element with its index.
        builder: ElementBuilder,
    },
}

impl Validation {
    /// The key this entry reports under.
    pub fn key(&self) -> &ValidationKey {
        match self {
            Validation::Leaf { key, .. }
            | Validation::Precomputed { key, .. }
            | Validation::NestedKeyed { key, .. }
            | Validation::NestedEach { key, .. } => key,
        }
    }

    /// Whether a missing key fails this entry. Precomputed entries never look.
    pub fn is_required(&self) -> bool {
        match self {
            Validation::Leaf { required, .. }
            | Validation::NestedKeyed { required, .. }
            | Validation::NestedEach { required, .. } => *required,
            Validation::Precomputed { .. } => false,
        }
    }

    pub(crate) fn run(
        &self,
        container: &dyn KeyedContainer<'_>,
        path: &ValidationPath,
    ) -> Result<ValidationResult> {
        let key = self.key().clone();
        if let Validation::Precomputed { outcome, .. } = self {
            return Ok(ValidationResult::scalar(key, outcome.clone()));
        }

        if !container.contains(&key) {
            return Ok(ValidationResult::scalar(key, self.absent(Failure::Missing)));
        }
        let path = path.child(key.clone());
        let decoder = container
            .decoder(&key)
            .map_err(|source| structural(&path, source))?;

        #[cfg(feature = "tracing")]
        tracing::trace!(path = %path, "running validation");

        match self {
            Validation::Leaf { check, .. } => {
                Ok(ValidationResult::scalar(key, check.check(decoder.as_ref())))
            }
            Validation::NestedKeyed { .. } | Validation::NestedEach { .. }
                if decoder.is_null() =>
            {
                Ok(ValidationResult::scalar(key, self.absent(Failure::Null)))
            }
            Validation::NestedKeyed { validations, .. } => {
                let nested = container
                    .nested_keyed(&key)
                    .map_err(|source| structural(&path, source))?;
                let report = validations.evaluate_keyed(nested.as_ref(), &path)?;
                Ok(ValidationResult::nested(key, report))
            }
            Validation::NestedEach { builder, .. } => {
                let elements = container
                    .nested_unkeyed(&key)
                    .map_err(|source| structural(&path, source))?;
                let reports = each_element(builder, elements.as_ref(), &path)?;
                Ok(ValidationResult::sequence(key, reports))
            }
            Validation::Precomputed { outcome, .. } => {
                Ok(ValidationResult::scalar(key, outcome.clone()))
            }
        }
    }

    /// The outcome for a key that holds nothing usable.
    fn absent(&self, failure: Failure) -> Outcome {
        if self.is_required() {
            Outcome::Fail(failure)
        } else {
            Outcome::Skipped
        }
    }
}

impl fmt::Debug for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validation::Leaf {
                key,
                required,
                check,
            } => f
                .debug_struct("Leaf")
                .field("key", key)
                .field("required", required)
                .field("type", &check.type_name())
                .finish(),
            Validation::Precomputed { key, outcome } => f
                .debug_struct("Precomputed")
                .field("key", key)
                .field("outcome", outcome)
                .finish(),
            Validation::NestedKeyed {
                key,
                required,
                validations,
            } => f
                .debug_struct("NestedKeyed")
                .field("key", key)
                .field("required", required)
                .field("validations", validations)
                .finish(),
            Validation::NestedEach { key, required, .. } => f
                .debug_struct("NestedEach")
                .field("key", key)
                .field("required", required)
                .finish_non_exhaustive(),
        }
    }
}

/// A per-element check applied when the whole payload is an array.
#[derive(Clone)]
pub struct UnkeyedValidation {
    builder: ElementBuilder,
}

impl UnkeyedValidation {
    pub(crate) fn new(builder: ElementBuilder) -> Self {
        Self { builder }
    }

    pub(crate) fn run(
        &self,
        container: &dyn UnkeyedContainer<'_>,
        path: &ValidationPath,
    ) -> Result<ValidationResult> {
        Ok(ValidationResult::unkeyed(each_element(
            &self.builder,
            container,
            path,
        )?))
    }
}

impl fmt::Debug for UnkeyedValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnkeyedValidation").finish_non_exhaustive()
    }
}

/// Build and evaluate one sub-tree per element, in index order.
fn each_element(
    builder: &ElementBuilder,
    elements: &dyn UnkeyedContainer<'_>,
    path: &ValidationPath,
) -> Result<Vec<ValidationsResult>> {
    (0..elements.count())
        .map(|index| {
            let path = path.child(ValidationKey::Indexed(index));
            let element = elements
                .decoder_at(index)
                .map_err(|source| structural(&path, source))?;
            let mut validations = Validations::new();
            builder(index, &mut validations);
            validations.evaluate(element.as_ref(), &path)
        })
        .collect()
}

fn structural(path: &ValidationPath, source: DecodeError) -> Error {
    #[cfg(feature = "tracing")]
    tracing::debug!(path = %path, error = %source, "container could not be decoded");

    Error::decode_at(path.clone(), source)
}
