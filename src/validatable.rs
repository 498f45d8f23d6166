//! Types that declare their own validations
//!
//! Implement [`Validatable`] on the type a handler decodes its payload into,
//! then check raw input before decoding it for real.
//!
//! ```
//! use sluice::validator::{number, string};
//! use sluice::{Validatable, Validations};
//!
//! struct SignUp;
//!
//! impl Validatable for SignUp {
//!     fn validations(validations: &mut Validations) {
//!         validations.add("username", string::count(3..=20).and(string::alphanumeric()));
//!         validations.add("age", number::min(13_u8));
//!     }
//! }
//!
//! # #[cfg(feature = "json")] {
//! assert!(SignUp::validate_json(r#"{"username": "ada", "age": 36}"#).is_ok());
//!
//! let err = SignUp::validate_json(r#"{"username": "a", "age": 36}"#).unwrap_err();
//! assert_eq!(err.to_string(), "username is less than minimum of 3 character(s)");
//! # }
//! ```

use crate::content::{ContentConfiguration, RequestParts};
use crate::decode::Decoder;
use crate::error::{Error, Result};
use crate::validations::Validations;

/// A type whose payloads are checked by a fixed tree.
///
/// The provided methods build the tree, evaluate it and turn a failing report
/// into [`Error::Invalid`].
pub trait Validatable {
    /// Add this type's entries to `validations`.
    fn validations(validations: &mut Validations);

    /// The tree for this type.
    fn build_validations() -> Validations {
        let mut validations = Validations::new();
        Self::validations(&mut validations);
        validations
    }

    /// Check an already decoded payload.
    fn validate_decoder(decoder: &dyn Decoder<'_>) -> Result<()> {
        passed(Self::build_validations().validate(decoder))
    }

    /// Check a request body.
    fn validate_request(request: &impl RequestParts, config: &ContentConfiguration) -> Result<()> {
        passed(Self::build_validations().validate_request(request, config))
    }

    /// Check a URL query string.
    fn validate_query(query: &str, config: &ContentConfiguration) -> Result<()> {
        passed(Self::build_validations().validate_query(query, config))
    }

    /// Check a JSON string.
    #[cfg(feature = "json")]
    fn validate_json(json: &str) -> Result<()> {
        passed(Self::build_validations().validate_json(json))
    }
}

fn passed(report: Result<crate::ValidationsResult>) -> Result<()> {
    report?.assert_valid().map(drop).map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RawRequest;
    use crate::validator::string;

    struct Ticket;

    impl Validatable for Ticket {
        fn validations(validations: &mut Validations) {
            validations.add("title", !string::empty());
            validations.add_optional("contact", string::email());
        }
    }

    struct Anything;

    impl Validatable for Anything {
        fn validations(_: &mut Validations) {}
    }

    #[test]
    fn test_query_passes_and_fails() {
        let config = ContentConfiguration::default();
        assert!(Ticket::validate_query("title=Broken+build", &config).is_ok());

        let err = Ticket::validate_query("title=&contact=nope", &config).unwrap_err();
        match err {
            Error::Invalid(invalid) => {
                let rendered: Vec<String> =
                    invalid.failures.iter().map(ToString::to_string).collect();
                assert_eq!(
                    rendered,
                    vec!["title is empty", "contact is not a valid email address"]
                );
            }
            other => panic!("expected invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_request_with_form_body() {
        let config = ContentConfiguration::default();
        let request = RawRequest::new("application/x-www-form-urlencoded", "title=Crash");
        assert!(Ticket::validate_request(&request, &config).is_ok());
    }

    #[test]
    fn test_type_without_entries_accepts_missing_input() {
        let config = ContentConfiguration::new();
        assert!(Anything::validate_request(&RawRequest::default(), &config).is_ok());
        assert!(Anything::validate_query("", &config).is_ok());
    }
}
