//! JSON adapter over `serde_json::Value`
//!
//! Feature-gated behind `json` (on by default).

use serde_json::{Map, Value};

use super::{
    BoxedDecoder, BoxedKeyed, BoxedUnkeyed, DecodeError, Decoder, Document, KeyedContainer,
    UnkeyedContainer,
};
use crate::content::ContentDecoder;
use crate::key::ValidationKey;

/// A decoder for one JSON value.
#[derive(Debug, Clone, Copy)]
pub struct JsonDecoder<'de> {
    value: &'de Value,
}

impl<'de> JsonDecoder<'de> {
    /// Decode from a borrowed value.
    pub fn new(value: &'de Value) -> Self {
        Self { value }
    }

    fn expecting<T>(&self, expected: &str) -> Result<T, DecodeError> {
        if self.value.is_null() {
            Err(DecodeError::ValueNotFound)
        } else {
            Err(DecodeError::mismatch(expected, kind(self.value)))
        }
    }
}

/// Short name of a JSON value's kind, used in mismatch errors.
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<'de> Decoder<'de> for JsonDecoder<'de> {
    fn is_null(&self) -> bool {
        self.value.is_null()
    }

    fn decode_bool(&self) -> Result<bool, DecodeError> {
        match self.value {
            Value::Bool(b) => Ok(*b),
            _ => self.expecting("bool"),
        }
    }

    fn decode_i64(&self) -> Result<i64, DecodeError> {
        match self.value.as_i64() {
            Some(n) => Ok(n),
            None => self.expecting("integer"),
        }
    }

    fn decode_u64(&self) -> Result<u64, DecodeError> {
        match self.value.as_u64() {
            Some(n) => Ok(n),
            None => self.expecting("unsigned integer"),
        }
    }

    fn decode_f64(&self) -> Result<f64, DecodeError> {
        match self.value.as_f64() {
            Some(n) => Ok(n),
            None => self.expecting("number"),
        }
    }

    fn decode_string(&self) -> Result<String, DecodeError> {
        match self.value {
            Value::String(s) => Ok(s.clone()),
            _ => self.expecting("string"),
        }
    }

    fn keyed(&self) -> Result<BoxedKeyed<'de>, DecodeError> {
        match self.value {
            Value::Object(map) => Ok(Box::new(JsonObject { map })),
            _ => self.expecting("object"),
        }
    }

    fn unkeyed(&self) -> Result<BoxedUnkeyed<'de>, DecodeError> {
        match self.value {
            Value::Array(items) => Ok(Box::new(JsonArray { items })),
            _ => self.expecting("array"),
        }
    }
}

/// A JSON object viewed as a keyed container.
#[derive(Debug, Clone, Copy)]
pub struct JsonObject<'de> {
    map: &'de Map<String, Value>,
}

impl<'de> KeyedContainer<'de> for JsonObject<'de> {
    fn contains(&self, key: &ValidationKey) -> bool {
        self.map.contains_key(&*key.member_name())
    }

    fn decoder(&self, key: &ValidationKey) -> Result<BoxedDecoder<'de>, DecodeError> {
        self.map
            .get(&*key.member_name())
            .map(|value| Box::new(JsonDecoder::new(value)) as BoxedDecoder<'de>)
            .ok_or_else(|| DecodeError::KeyNotFound(key.clone()))
    }
}

/// A JSON array viewed as an unkeyed container.
#[derive(Debug, Clone, Copy)]
pub struct JsonArray<'de> {
    items: &'de [Value],
}

impl<'de> UnkeyedContainer<'de> for JsonArray<'de> {
    fn count(&self) -> usize {
        self.items.len()
    }

    fn decoder_at(&self, index: usize) -> Result<BoxedDecoder<'de>, DecodeError> {
        self.items
            .get(index)
            .map(|value| Box::new(JsonDecoder::new(value)) as BoxedDecoder<'de>)
            .ok_or(DecodeError::IndexOutOfBounds {
                index,
                count: self.items.len(),
            })
    }
}

impl Document for Value {
    fn root(&self) -> BoxedDecoder<'_> {
        Box::new(JsonDecoder::new(self))
    }
}

/// Parses `application/json` bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonContentDecoder;

impl ContentDecoder for JsonContentDecoder {
    fn parse(&self, bytes: &[u8]) -> Result<Box<dyn Document>, DecodeError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|err| DecodeError::DataCorrupted(err.to_string()))?;
        Ok(Box::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{KeyedExt, UnkeyedExt};
    use serde_json::json;

    #[test]
    fn test_scalars_decode() {
        let doc = json!({"s": "x", "b": true, "i": -3, "u": 7, "f": 1.5});
        let object = JsonDecoder::new(&doc).keyed().unwrap();
        assert_eq!(object.decode_scalar::<String>(&"s".into()).unwrap(), "x");
        assert!(object.decode_scalar::<bool>(&"b".into()).unwrap());
        assert_eq!(object.decode_scalar::<i32>(&"i".into()).unwrap(), -3);
        assert_eq!(object.decode_scalar::<u16>(&"u".into()).unwrap(), 7);
        assert_eq!(object.decode_scalar::<f64>(&"f".into()).unwrap(), 1.5);
        assert_eq!(object.decode_scalar::<f64>(&"u".into()).unwrap(), 7.0);
    }

    #[test]
    fn test_nested_containers_at_index() {
        let doc = json!([[1, 2], [3], {"x": true}]);
        let items = JsonDecoder::new(&doc).unkeyed().unwrap();
        assert_eq!(items.nested_unkeyed_at(0).unwrap().count(), 2);
        assert_eq!(
            items.nested_unkeyed_at(1).unwrap().decode_scalar_at::<i64>(0),
            Ok(3)
        );
        let object = items.nested_keyed_at(2).unwrap();
        assert!(object.decode_scalar::<bool>(&"x".into()).unwrap());
        assert!(matches!(
            items.nested_unkeyed_at(2),
            Err(DecodeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_type_mismatch_names_found_kind() {
        let doc = json!({"n": 5});
        let object = JsonDecoder::new(&doc).keyed().unwrap();
        assert_eq!(
            object.decode_scalar::<String>(&"n".into()),
            Err(DecodeError::mismatch("string", "number"))
        );
    }

    #[test]
    fn test_narrowing_overflow_is_mismatch() {
        let doc = json!({"n": 300, "neg": -1});
        let object = JsonDecoder::new(&doc).keyed().unwrap();
        assert!(matches!(
            object.decode_scalar::<u8>(&"n".into()),
            Err(DecodeError::TypeMismatch { .. })
        ));
        assert!(matches!(
            object.decode_scalar::<u32>(&"neg".into()),
            Err(DecodeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_null_handling() {
        let doc = json!({"n": null});
        let object = JsonDecoder::new(&doc).keyed().unwrap();
        assert!(object.contains(&"n".into()));
        assert_eq!(
            object.decode_scalar::<String>(&"n".into()),
            Err(DecodeError::ValueNotFound)
        );
        assert_eq!(object.decode_scalar::<Option<String>>(&"n".into()), Ok(None));
    }

    #[test]
    fn test_indexed_key_looks_up_decimal_member() {
        let doc = json!({"0": "zero"});
        let object = JsonDecoder::new(&doc).keyed().unwrap();
        assert!(object.contains(&ValidationKey::Indexed(0)));
        assert_eq!(
            object.decode_scalar::<String>(&ValidationKey::Indexed(0)).unwrap(),
            "zero"
        );
    }

    #[test]
    fn test_arrays() {
        let doc = json!([1, 2, 3]);
        let items = JsonDecoder::new(&doc).unkeyed().unwrap();
        assert_eq!(items.count(), 3);
        assert_eq!(items.decode_scalar_at::<i64>(2).unwrap(), 3);
        assert_eq!(
            items.decode_scalar_at::<i64>(3),
            Err(DecodeError::IndexOutOfBounds { index: 3, count: 3 })
        );

        let doc = json!({"tags": ["a", "b"]});
        let object = JsonDecoder::new(&doc).keyed().unwrap();
        assert_eq!(
            object.decode_scalar::<Vec<String>>(&"tags".into()).unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_container_shape_mismatch() {
        let doc = json!([1]);
        assert!(matches!(
            JsonDecoder::new(&doc).keyed(),
            Err(DecodeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_content_decoder_rejects_malformed_bytes() {
        let result = JsonContentDecoder.parse(b"{\"a\": ");
        assert!(matches!(result, Err(DecodeError::DataCorrupted(_))));
        let doc = JsonContentDecoder.parse(br#"{"a": 1}"#).unwrap();
        assert!(doc.root().keyed().unwrap().contains(&"a".into()));
    }
}
