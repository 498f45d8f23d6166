//! Errors that abort a validation call
//!
//! Per-field problems never show up here; they are [`Outcome`]s inside the
//! returned report. An [`Error`] means no report could be produced at all, or,
//! for [`Error::Invalid`], that a caller asked for a passing report and did
//! not get one.
//!
//! [`Outcome`]: crate::Outcome

use crate::decode::DecodeError;
use crate::key::ValidationPath;
use crate::result::ValidationsError;

/// Why a validation call did not produce a report.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// No decoder is registered for the requested format.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Required input was absent before any decoding was attempted.
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    /// A container could not be obtained in the shape the tree demands.
    #[error("{}", describe_decode(.path, .source))]
    Decode {
        /// Where the container was expected; empty for the payload itself.
        path: ValidationPath,
        /// What went wrong.
        #[source]
        source: DecodeError,
    },

    /// The report was complete but contained failures.
    #[error(transparent)]
    Invalid(#[from] ValidationsError),
}

impl Error {
    /// A structural failure at `path`.
    pub fn decode_at(path: ValidationPath, source: DecodeError) -> Self {
        Error::Decode { path, source }
    }

    /// Whether this is a structural decode failure.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }
}

impl From<DecodeError> for Error {
    fn from(source: DecodeError) -> Self {
        Error::Decode {
            path: ValidationPath::root(),
            source,
        }
    }
}

fn describe_decode(path: &ValidationPath, source: &DecodeError) -> String {
    if path.is_root() {
        format!("could not decode payload: {}", source)
    } else {
        format!("could not decode '{}': {}", path, source)
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display_includes_path() {
        let err = Error::decode_at(
            ValidationPath::root().child("address".into()),
            DecodeError::mismatch("object", "string"),
        );
        assert_eq!(
            err.to_string(),
            "could not decode 'address': expected object, found string"
        );
        assert!(err.is_decode());
    }

    #[test]
    fn test_root_decode_error_display() {
        let err = Error::from(DecodeError::DataCorrupted("EOF".into()));
        assert_eq!(err.to_string(), "could not decode payload: data corrupted: EOF");
    }

    #[test]
    fn test_missing_input_display() {
        assert_eq!(
            Error::MissingInput("body").to_string(),
            "missing input: body"
        );
    }
}
