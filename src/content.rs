//! Payload adapters: turning raw request input into a decodable document
//!
//! The engine itself never parses bytes. A [`ContentConfiguration`] maps media
//! types to [`ContentDecoder`]s, and the request-facing entry points on
//! [`Validations`](crate::Validations) use it to resolve a root [`Document`]
//! before evaluating.
//!
//! # Examples
//!
//! ```
//! use sluice::content::{ContentConfiguration, MediaType};
//!
//! let config = ContentConfiguration::default();
//! let form = MediaType::parse("application/x-www-form-urlencoded; charset=utf-8");
//! assert!(config.require_decoder(&form).is_ok());
//! assert!(config.require_decoder(&MediaType::parse("text/csv")).is_err());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::decode::{DecodeError, Document};
use crate::error::{Error, Result};

/// Parses raw bytes of one format into a document.
pub trait ContentDecoder: Send + Sync {
    /// Parse `bytes`, failing with [`DecodeError::DataCorrupted`] on malformed input.
    fn parse(&self, bytes: &[u8]) -> std::result::Result<Box<dyn Document>, DecodeError>;
}

/// A normalised `type/subtype` pair, without parameters.
///
/// ```
/// use sluice::content::MediaType;
///
/// assert_eq!(MediaType::parse("Application/JSON; charset=utf-8"), MediaType::JSON);
/// assert_eq!(MediaType::JSON.to_string(), "application/json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType(std::borrow::Cow<'static, str>);

impl MediaType {
    /// `application/json`
    pub const JSON: MediaType = MediaType(std::borrow::Cow::Borrowed("application/json"));
    /// `application/x-www-form-urlencoded`
    pub const URL_ENCODED_FORM: MediaType =
        MediaType(std::borrow::Cow::Borrowed("application/x-www-form-urlencoded"));

    /// Parse a `Content-Type` header value.
    pub fn parse(header: &str) -> Self {
        let essence = header.split(';').next().unwrap_or_default();
        MediaType(std::borrow::Cow::Owned(essence.trim().to_ascii_lowercase()))
    }

    /// The `type/subtype` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which decoder handles which payload.
///
/// Built once at startup and shared by reference. `Default` registers the
/// adapters shipped with this crate; `new` starts empty.
#[derive(Clone)]
pub struct ContentConfiguration {
    decoders: HashMap<MediaType, Arc<dyn ContentDecoder>>,
    url_decoder: Option<Arc<dyn ContentDecoder>>,
}

impl ContentConfiguration {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
            url_decoder: None,
        }
    }

    /// Register `decoder` for bodies of `media_type`, replacing any previous one.
    pub fn with_decoder(
        mut self,
        media_type: MediaType,
        decoder: impl ContentDecoder + 'static,
    ) -> Self {
        self.decoders.insert(media_type, Arc::new(decoder));
        self
    }

    /// Register the decoder used for query strings.
    pub fn with_url_decoder(mut self, decoder: impl ContentDecoder + 'static) -> Self {
        self.url_decoder = Some(Arc::new(decoder));
        self
    }

    /// The decoder for `media_type`.
    pub fn require_decoder(&self, media_type: &MediaType) -> Result<&dyn ContentDecoder> {
        self.decoders
            .get(media_type)
            .map(|decoder| decoder.as_ref())
            .ok_or_else(|| {
                Error::Configuration(format!("no decoder registered for {}", media_type))
            })
    }

    /// The decoder for query strings.
    pub fn require_url_decoder(&self) -> Result<&dyn ContentDecoder> {
        self.url_decoder
            .as_deref()
            .ok_or_else(|| Error::Configuration("no URL decoder registered".to_string()))
    }
}

impl Default for ContentConfiguration {
    fn default() -> Self {
        let config = Self::new()
            .with_decoder(
                MediaType::URL_ENCODED_FORM,
                crate::decode::query::UrlEncodedDecoder,
            )
            .with_url_decoder(crate::decode::query::UrlEncodedDecoder);
        #[cfg(feature = "json")]
        let config = config.with_decoder(MediaType::JSON, crate::decode::json::JsonContentDecoder);
        config
    }
}

impl fmt::Debug for ContentConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut media_types: Vec<&str> = self.decoders.keys().map(MediaType::as_str).collect();
        media_types.sort_unstable();
        f.debug_struct("ContentConfiguration")
            .field("decoders", &media_types)
            .field("url_decoder", &self.url_decoder.is_some())
            .finish()
    }
}

/// The parts of an HTTP request a body validation needs.
///
/// Implement this for the request type of whatever server framework is in use.
pub trait RequestParts {
    /// The raw `Content-Type` header value.
    fn content_type(&self) -> Option<&str>;

    /// The collected body bytes.
    fn body(&self) -> Option<&[u8]>;
}

/// A request assembled from its parts, for tests and simple adapters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRequest {
    /// `Content-Type` header value.
    pub content_type: Option<String>,
    /// Body bytes.
    pub body: Option<Vec<u8>>,
}

impl RawRequest {
    /// A request with both a content type and a body.
    pub fn new(content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            body: Some(body.into()),
        }
    }
}

impl RequestParts for RawRequest {
    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Resolve the document for a request body.
pub(crate) fn parse_request(
    request: &impl RequestParts,
    config: &ContentConfiguration,
) -> Result<Box<dyn Document>> {
    let content_type = request
        .content_type()
        .ok_or(Error::MissingInput("content type"))?;
    let body = request.body().ok_or(Error::MissingInput("body"))?;
    let media_type = MediaType::parse(content_type);
    let decoder = config.require_decoder(&media_type)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(media_type = %media_type, bytes = body.len(), "decoding request body");

    decoder.parse(body).map_err(Error::from)
}

/// Resolve the document for a query string.
pub(crate) fn parse_query(query: &str, config: &ContentConfiguration) -> Result<Box<dyn Document>> {
    let decoder = config.require_url_decoder()?;
    decoder
        .parse(query.trim_start_matches('?').as_bytes())
        .map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::query::UrlEncodedDecoder;

    #[test]
    fn test_media_type_normalises_case_and_parameters() {
        assert_eq!(
            MediaType::parse(" APPLICATION/Json ;charset=UTF-8"),
            MediaType::JSON
        );
        assert_eq!(MediaType::parse("text/plain").as_str(), "text/plain");
    }

    #[test]
    fn test_empty_configuration_has_no_decoders() {
        let config = ContentConfiguration::new();
        assert!(matches!(
            config.require_decoder(&MediaType::JSON),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            config.require_url_decoder(),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_default_configuration_registers_shipped_adapters() {
        let config = ContentConfiguration::default();
        assert!(config.require_decoder(&MediaType::URL_ENCODED_FORM).is_ok());
        assert!(config.require_url_decoder().is_ok());
        #[cfg(feature = "json")]
        assert!(config.require_decoder(&MediaType::JSON).is_ok());
    }

    #[test]
    fn test_parse_request_requires_content_type_then_body() {
        let config = ContentConfiguration::default();

        let request = RawRequest {
            content_type: None,
            body: Some(b"a=1".to_vec()),
        };
        assert!(matches!(
            parse_request(&request, &config),
            Err(Error::MissingInput("content type"))
        ));

        let request = RawRequest {
            content_type: Some("application/x-www-form-urlencoded".into()),
            body: None,
        };
        assert!(matches!(
            parse_request(&request, &config),
            Err(Error::MissingInput("body"))
        ));
    }

    #[test]
    fn test_parse_request_unknown_media_type() {
        let config = ContentConfiguration::default();
        let request = RawRequest::new("text/csv", "a,b");
        assert!(matches!(
            parse_request(&request, &config),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_parse_query_strips_question_mark() {
        let config = ContentConfiguration::default();
        let doc = parse_query("?a=1", &config).unwrap();
        assert!(doc.root().keyed().unwrap().contains(&"a".into()));
    }

    #[test]
    fn test_debug_lists_media_types() {
        let config = ContentConfiguration::new().with_url_decoder(UrlEncodedDecoder);
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("url_decoder: true"));
    }
}
