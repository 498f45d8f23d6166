//! URL-encoded adapter for query strings and form bodies
//!
//! Pairs are split and percent-decoded with `url::form_urlencoded`; bracket
//! syntax in names then builds nested values:
//!
//! | input | shape |
//! |---|---|
//! | `name=Ada` | `{"name": "Ada"}` |
//! | `tag=a&tag=b` | `{"tag": ["a", "b"]}` |
//! | `tags[]=a&tags[]=b` | `{"tags": ["a", "b"]}` |
//! | `address[city]=Oslo` | `{"address": {"city": "Oslo"}}` |
//! | `pets[0][name]=Rex` | `{"pets": [{"name": "Rex"}]}` |
//! | `pets[][name]=Rex&pets[][name]=Tom` | `{"pets": [{"name": "Rex"}, {"name": "Tom"}]}` |
//!
//! Every scalar arrives as text and is parsed on demand: integers and floats
//! with `str::parse`, booleans from `true`/`false`/`1`/`0`/`on`/`off`/`yes`/`no`.
//! An empty value counts as null, so `nickname=` decodes to `None` for an
//! `Option<String>` leaf and to `""` for a `String` leaf.
//!
//! ```
//! use sluice::decode::{query::QueryDocument, Decoder, Document, KeyedExt};
//!
//! let doc = QueryDocument::parse("age=36&address[city]=Oslo").unwrap();
//! let root = doc.root();
//! let object = root.keyed().unwrap();
//! assert_eq!(object.decode_scalar::<u32>(&"age".into()).unwrap(), 36);
//!
//! let address = object.nested_keyed(&"address".into()).unwrap();
//! assert_eq!(address.decode_scalar::<String>(&"city".into()).unwrap(), "Oslo");
//! ```

use url::form_urlencoded;

use super::{
    BoxedDecoder, BoxedKeyed, BoxedUnkeyed, DecodeError, Decoder, Document, KeyedContainer,
    UnkeyedContainer,
};
use crate::content::ContentDecoder;
use crate::key::ValidationKey;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    List(Vec<Node>),
    Map(Vec<(String, Node)>),
}

impl Node {
    fn kind(&self) -> &'static str {
        match self {
            Node::Text(_) => "text",
            Node::List(_) => "array",
            Node::Map(_) => "object",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Key(String),
    Push,
}

/// A parsed URL-encoded payload.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDocument {
    root: Node,
}

impl QueryDocument {
    /// Parse a query string (without the leading `?`) or form body.
    ///
    /// Fails only when names give one field two incompatible shapes, such as
    /// `a=1&a[b]=2`.
    pub fn parse(input: &str) -> Result<Self, DecodeError> {
        Self::parse_bytes(input.as_bytes())
    }

    /// Parse raw URL-encoded bytes.
    pub fn parse_bytes(input: &[u8]) -> Result<Self, DecodeError> {
        let mut root = Some(Node::Map(Vec::new()));
        for (name, value) in form_urlencoded::parse(input) {
            let segments = split_name(&name);
            insert(&mut root, &segments, value.into_owned(), &name)?;
        }
        Ok(Self {
            root: root.unwrap_or(Node::Map(Vec::new())),
        })
    }
}

impl Document for QueryDocument {
    fn root(&self) -> BoxedDecoder<'_> {
        Box::new(QueryDecoder { node: &self.root })
    }
}

/// Split `a[b][]` into `[Key(a), Key(b), Push]`.
///
/// Names with unbalanced brackets are taken literally.
fn split_name(name: &str) -> Vec<Segment> {
    let Some(open) = name.find('[') else {
        return vec![Segment::Key(name.to_string())];
    };
    if open == 0 {
        return vec![Segment::Key(name.to_string())];
    }

    let mut segments = vec![Segment::Key(name[..open].to_string())];
    let mut rest = &name[open..];
    while !rest.is_empty() {
        let Some(inner) = rest.strip_prefix('[') else {
            return vec![Segment::Key(name.to_string())];
        };
        let Some(close) = inner.find(']') else {
            return vec![Segment::Key(name.to_string())];
        };
        let part = &inner[..close];
        segments.push(if part.is_empty() {
            Segment::Push
        } else {
            Segment::Key(part.to_string())
        });
        rest = &inner[close + 1..];
    }
    segments
}

fn conflict(name: &str) -> DecodeError {
    DecodeError::DataCorrupted(format!("conflicting shapes for field '{}'", name))
}

fn insert(
    slot: &mut Option<Node>,
    segments: &[Segment],
    value: String,
    name: &str,
) -> Result<(), DecodeError> {
    match segments.split_first() {
        None => {
            *slot = Some(match slot.take() {
                None => Node::Text(value),
                Some(Node::Text(previous)) => Node::List(vec![Node::Text(previous), Node::Text(value)]),
                Some(Node::List(mut items)) => {
                    items.push(Node::Text(value));
                    Node::List(items)
                }
                Some(Node::Map(_)) => return Err(conflict(name)),
            });
            Ok(())
        }
        Some((Segment::Push, rest)) => {
            let mut items = match slot.take() {
                None => Vec::new(),
                Some(Node::List(items)) => items,
                Some(Node::Text(previous)) => vec![Node::Text(previous)],
                Some(Node::Map(_)) => return Err(conflict(name)),
            };
            if rest.is_empty() {
                items.push(Node::Text(value));
            } else {
                let reuse_last = match (items.last(), rest.first()) {
                    (Some(Node::Map(entries)), Some(Segment::Key(key))) => {
                        !entries.iter().any(|(existing, _)| existing == key)
                    }
                    _ => false,
                };
                let mut child = if reuse_last { items.pop() } else { None };
                insert(&mut child, rest, value, name)?;
                items.extend(child);
            }
            *slot = Some(Node::List(items));
            Ok(())
        }
        Some((Segment::Key(key), rest)) => {
            let mut entries = match slot.take() {
                None => Vec::new(),
                Some(Node::Map(entries)) => entries,
                Some(_) => return Err(conflict(name)),
            };
            match entries.iter().position(|(existing, _)| existing == key) {
                Some(position) => {
                    let placeholder = Node::Map(Vec::new());
                    let mut child = Some(std::mem::replace(&mut entries[position].1, placeholder));
                    insert(&mut child, rest, value, name)?;
                    if let Some(child) = child {
                        entries[position].1 = child;
                    }
                }
                None => {
                    let mut child = None;
                    insert(&mut child, rest, value, name)?;
                    if let Some(child) = child {
                        entries.push((key.clone(), child));
                    }
                }
            }
            *slot = Some(Node::Map(entries));
            Ok(())
        }
    }
}

/// A decoder for one URL-encoded value.
#[derive(Debug, Clone, Copy)]
pub struct QueryDecoder<'de> {
    node: &'de Node,
}

impl<'de> QueryDecoder<'de> {
    fn text(&self, expected: &str) -> Result<&'de str, DecodeError> {
        match self.node {
            Node::Text(text) if text.is_empty() => Err(DecodeError::ValueNotFound),
            Node::Text(text) => Ok(text.as_str()),
            other => Err(DecodeError::mismatch(expected, other.kind())),
        }
    }

    fn parsed<T: std::str::FromStr>(&self, expected: &str) -> Result<T, DecodeError> {
        let text = self.text(expected)?;
        text.parse()
            .map_err(|_| DecodeError::mismatch(expected, format!("'{}'", text)))
    }
}

impl<'de> Decoder<'de> for QueryDecoder<'de> {
    fn is_null(&self) -> bool {
        matches!(self.node, Node::Text(text) if text.is_empty())
    }

    fn decode_bool(&self) -> Result<bool, DecodeError> {
        let text = self.text("bool")?;
        match text.to_ascii_lowercase().as_str() {
            "true" | "1" | "on" | "yes" => Ok(true),
            "false" | "0" | "off" | "no" => Ok(false),
            _ => Err(DecodeError::mismatch("bool", format!("'{}'", text))),
        }
    }

    fn decode_i64(&self) -> Result<i64, DecodeError> {
        self.parsed("integer")
    }

    fn decode_u64(&self) -> Result<u64, DecodeError> {
        self.parsed("unsigned integer")
    }

    fn decode_f64(&self) -> Result<f64, DecodeError> {
        self.parsed("number")
    }

    fn decode_string(&self) -> Result<String, DecodeError> {
        match self.node {
            Node::Text(text) => Ok(text.clone()),
            other => Err(DecodeError::mismatch("string", other.kind())),
        }
    }

    fn keyed(&self) -> Result<BoxedKeyed<'de>, DecodeError> {
        match self.node {
            Node::Map(entries) => Ok(Box::new(QueryObject { entries })),
            other => Err(DecodeError::mismatch("object", other.kind())),
        }
    }

    fn unkeyed(&self) -> Result<BoxedUnkeyed<'de>, DecodeError> {
        match self.node {
            Node::List(items) => Ok(Box::new(QueryArray {
                items: items.iter().collect(),
            })),
            Node::Map(entries) => {
                let mut indexed = entries
                    .iter()
                    .map(|(name, node)| name.parse::<usize>().map(|index| (index, node)))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| DecodeError::mismatch("array", "object"))?;
                indexed.sort_by_key(|(index, _)| *index);
                let missing = indexed
                    .iter()
                    .enumerate()
                    .find_map(|(expected, (index, _))| (*index != expected).then_some(expected));
                if let Some(missing) = missing {
                    return Err(DecodeError::DataCorrupted(format!(
                        "array index {} is missing",
                        missing
                    )));
                }
                Ok(Box::new(QueryArray {
                    items: indexed.into_iter().map(|(_, node)| node).collect(),
                }))
            }
            // `tag=a` is a list of one
            Node::Text(_) => Ok(Box::new(QueryArray {
                items: vec![self.node],
            })),
        }
    }
}

/// A bracketed group viewed as a keyed container.
#[derive(Debug, Clone, Copy)]
pub struct QueryObject<'de> {
    entries: &'de [(String, Node)],
}

impl<'de> QueryObject<'de> {
    fn find(&self, key: &ValidationKey) -> Option<&'de Node> {
        let name = key.member_name();
        self.entries
            .iter()
            .find(|(existing, _)| existing.as_str() == &*name)
            .map(|(_, node)| node)
    }
}

impl<'de> KeyedContainer<'de> for QueryObject<'de> {
    fn contains(&self, key: &ValidationKey) -> bool {
        self.find(key).is_some()
    }

    fn decoder(&self, key: &ValidationKey) -> Result<BoxedDecoder<'de>, DecodeError> {
        self.find(key)
            .map(|node| Box::new(QueryDecoder { node }) as BoxedDecoder<'de>)
            .ok_or_else(|| DecodeError::KeyNotFound(key.clone()))
    }
}

/// Repeated or bracketed values viewed as an unkeyed container.
#[derive(Debug, Clone)]
pub struct QueryArray<'de> {
    items: Vec<&'de Node>,
}

impl<'de> UnkeyedContainer<'de> for QueryArray<'de> {
    fn count(&self) -> usize {
        self.items.len()
    }

    fn decoder_at(&self, index: usize) -> Result<BoxedDecoder<'de>, DecodeError> {
        self.items
            .get(index)
            .map(|node| Box::new(QueryDecoder { node }) as BoxedDecoder<'de>)
            .ok_or(DecodeError::IndexOutOfBounds {
                index,
                count: self.items.len(),
            })
    }
}

/// Parses `application/x-www-form-urlencoded` bodies and query strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlEncodedDecoder;

impl ContentDecoder for UrlEncodedDecoder {
    fn parse(&self, bytes: &[u8]) -> Result<Box<dyn Document>, DecodeError> {
        Ok(Box::new(QueryDocument::parse_bytes(bytes)?))
    }
}
