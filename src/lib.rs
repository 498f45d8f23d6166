//! # Sluice
//!
//! Declarative validation trees checked against decoded payloads.
//!
//! Declare what a payload must look like as a tree of keyed checks, then
//! evaluate it once against a JSON body, a form body, a query string or any
//! other format with a [`Decoder`](decode::Decoder). Evaluation collects every
//! failing field instead of stopping at the first one; only a payload whose
//! shape cannot be walked at all aborts with an [`Error`].
//!
//! ## Quick Example
//!
//! ```rust
//! use sluice::content::ContentConfiguration;
//! use sluice::validator::{collection, number, string};
//! use sluice::Validations;
//!
//! let mut validations = Validations::new();
//! validations.add("email", string::email());
//! validations.add("age", number::range(13_u8..=130));
//! validations.add_optional("tags", collection::count::<String>(..=3));
//!
//! let config = ContentConfiguration::default();
//! let report = validations
//!     .validate_query("email=ada%40example.dev&age=9&tags[]=a", &config)
//!     .unwrap();
//!
//! assert!(!report.is_valid());
//! for failure in report.failures() {
//!     // "age is less than minimum of 13"
//!     println!("{}", failure);
//! }
//! ```
//!
//! ## Features
//!
//! - `json` (default): JSON adapter and [`Validations::validate_json`].
//! - `serde`: `Serialize` for reports, keys and outcomes.
//! - `tracing`: debug events around decoding and evaluation.
//! - `proptest`: `Arbitrary` for [`Outcome`] and [`Failure`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod content;
pub mod decode;
pub mod error;
pub mod key;
pub mod outcome;
pub mod result;
pub mod testing;
pub mod validatable;
pub mod validation;
pub mod validations;
pub mod validator;

// Re-exports
pub use decode::{Decode, DecodeError};
pub use error::{Error, Result};
pub use key::{ValidationKey, ValidationPath};
pub use outcome::{Failure, Outcome};
pub use result::{FieldFailure, ResultNode, ValidationResult, ValidationsError, ValidationsResult};
pub use validatable::Validatable;
pub use validation::{LeafCheck, UnkeyedValidation, Validation};
pub use validations::Validations;
pub use validator::{Validator, Verdict};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::content::{ContentConfiguration, MediaType, RequestParts};
    pub use crate::error::{Error, Result};
    pub use crate::key::ValidationKey;
    pub use crate::outcome::{Failure, Outcome};
    pub use crate::result::ValidationsResult;
    pub use crate::validatable::Validatable;
    pub use crate::validations::Validations;
    pub use crate::validator::{collection, number, string, Validator};
}
