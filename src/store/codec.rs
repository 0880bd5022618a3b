//! Document encoding
//!
//! The store never touches text directly; it hands documents to a
//! [`DocumentCodec`]. [`JsonCodec`] is the default and writes compact JSON
//! with serde_json.
//!
//! # Decoding rules
//!
//! - The root must be an object; anything else is `CodecError::Structure`
//! - Nesting deeper than the limit is rejected before it can recurse further,
//!   so a corrupt image cannot exhaust a small stack
//! - Duplicate keys resolve to the last occurrence

use super::document::Document;
use super::value::Value;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::{Deserialize, Deserializer};

/// Default maximum nesting depth (root object counts as one level)
pub const DEFAULT_NESTING_LIMIT: u8 = 10;

/// Encode/decode failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// No input bytes
    Empty,
    /// Malformed text
    Syntax,
    /// Well-formed but not a document (e.g. root is not an object)
    Structure,
    /// Nesting deeper than the configured limit
    TooDeep,
    /// Input ended in the middle of a value
    Eof,
    /// Document could not be encoded
    Encode,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            CodecError::Empty => "empty input",
            CodecError::Syntax => "malformed input",
            CodecError::Structure => "root is not an object",
            CodecError::TooDeep => "nesting limit exceeded",
            CodecError::Eof => "unexpected end of input",
            CodecError::Encode => "encoding failed",
        };
        f.write_str(msg)
    }
}

/// Structured document serializer
pub trait DocumentCodec {
    /// Encode `doc` to bytes
    ///
    /// Output must not contain a `0x00` byte; the store uses it as terminator.
    fn encode(&self, doc: &Document) -> Result<Vec<u8>, CodecError>;

    /// Decode bytes into a document
    fn decode(&self, bytes: &[u8]) -> Result<Document, CodecError>;
}

/// Compact JSON codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonCodec {
    nesting_limit: u8,
}

impl JsonCodec {
    /// Create a codec with the default nesting limit
    pub const fn new() -> Self {
        Self {
            nesting_limit: DEFAULT_NESTING_LIMIT,
        }
    }

    /// Create a codec that rejects documents nested deeper than `limit`
    pub const fn with_nesting_limit(limit: u8) -> Self {
        Self {
            nesting_limit: limit,
        }
    }

    pub fn nesting_limit(&self) -> u8 {
        self.nesting_limit
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentCodec for JsonCodec {
    fn encode(&self, doc: &Document) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(doc).map_err(|_| CodecError::Encode)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document, CodecError> {
        if bytes.is_empty() {
            return Err(CodecError::Empty);
        }

        let mut de = serde_json::Deserializer::from_slice(bytes);
        let doc = DocumentSeed {
            depth: self.nesting_limit,
        }
        .deserialize(&mut de)
        .map_err(classify)?;
        de.end().map_err(classify)?;
        Ok(doc)
    }
}

/// Marker message used to recognise nesting-limit errors
const TOO_DEEP: &str = "nesting limit exceeded";

fn classify(err: serde_json::Error) -> CodecError {
    use serde_json::error::Category;

    match err.classify() {
        Category::Eof => CodecError::Eof,
        Category::Syntax | Category::Io => CodecError::Syntax,
        Category::Data if err.to_string().starts_with(TOO_DEEP) => CodecError::TooDeep,
        Category::Data => CodecError::Structure,
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => items.serialize(serializer),
            Value::Object(doc) => doc.serialize(serializer),
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ValueSeed {
            depth: DEFAULT_NESTING_LIMIT,
        }
        .deserialize(deserializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        DocumentSeed {
            depth: DEFAULT_NESTING_LIMIT,
        }
        .deserialize(deserializer)
    }
}

/// Deserializes any value with `depth` container levels still allowed
struct ValueSeed {
    depth: u8,
}

impl<'de> DeserializeSeed<'de> for ValueSeed {
    type Value = Value;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor { depth: self.depth })
    }
}

/// Deserializes an object with `depth` container levels still allowed
struct DocumentSeed {
    depth: u8,
}

impl<'de> DeserializeSeed<'de> for DocumentSeed {
    type Value = Document;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Document, D::Error> {
        deserializer.deserialize_map(DocumentVisitor { depth: self.depth })
    }
}

struct ValueVisitor {
    depth: u8,
}

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(String::from(v)))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        ValueSeed { depth: self.depth }.deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let depth = descend::<A::Error>(self.depth)?;
        let mut items = Vec::new();
        while let Some(item) = seq.next_element_seed(ValueSeed { depth })? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Value, A::Error> {
        DocumentVisitor { depth: self.depth }
            .visit_map(map)
            .map(Value::Object)
    }
}

struct DocumentVisitor {
    depth: u8,
}

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Document, A::Error> {
        let depth = descend::<A::Error>(self.depth)?;
        let mut doc = Document::new();
        while let Some(key) = map.next_key::<String>()? {
            let value = map.next_value_seed(ValueSeed { depth })?;
            doc.insert(key, value);
        }
        Ok(doc)
    }
}

/// Enter one container level
fn descend<E: de::Error>(depth: u8) -> Result<u8, E> {
    depth.checked_sub(1).ok_or_else(|| E::custom(TOO_DEEP))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sample() -> Document {
        let mut wifi = Document::new();
        wifi.insert("ssid", Value::from("MyNetwork"));
        wifi.insert("dhcp", Value::Bool(true));

        let mut doc = Document::new();
        doc.insert("boots", Value::Int(3));
        doc.insert("gain", Value::Float(0.25));
        doc.insert("wifi", Value::Object(wifi));
        doc.insert("pins", Value::Array(vec![Value::Int(2), Value::Int(15)]));
        doc.insert("note", Value::Null);
        doc
    }

    #[test]
    fn test_encode_compact_in_insertion_order() {
        let text = JsonCodec::new().encode(&sample()).unwrap();
        assert_eq!(
            text,
            br#"{"boots":3,"gain":0.25,"wifi":{"ssid":"MyNetwork","dhcp":true},"pins":[2,15],"note":null}"#
        );
    }

    #[test]
    fn test_decode_preserves_types_and_order() {
        let codec = JsonCodec::new();
        let doc = codec.decode(&codec.encode(&sample()).unwrap()).unwrap();

        assert_eq!(doc, sample());
        let keys: Vec<&str> = doc.keys().collect();
        assert_eq!(keys, ["boots", "gain", "wifi", "pins", "note"]);
    }

    #[test]
    fn test_float_with_integral_value_stays_float() {
        let mut doc = Document::new();
        doc.insert("f", Value::Float(2.0));

        let codec = JsonCodec::new();
        let decoded = codec.decode(&codec.encode(&doc).unwrap()).unwrap();
        assert_eq!(decoded.get("f"), Some(&Value::Float(2.0)));
    }

    #[test]
    fn test_encoded_strings_never_contain_nul() {
        let mut doc = Document::new();
        doc.insert("raw", Value::from("a\0b"));

        let text = JsonCodec::new().encode(&doc).unwrap();
        assert!(!text.contains(&0));
    }

    #[test]
    fn test_decode_errors() {
        let codec = JsonCodec::new();

        assert_eq!(codec.decode(b""), Err(CodecError::Empty));
        assert_eq!(codec.decode(b"{\"a\":1"), Err(CodecError::Eof));
        assert_eq!(codec.decode(b"{a:1}"), Err(CodecError::Syntax));
        assert_eq!(codec.decode(&[0xFF, 0xFF, 0xFF]), Err(CodecError::Syntax));
        assert_eq!(codec.decode(b"{} trailing"), Err(CodecError::Syntax));
        assert_eq!(codec.decode(b"[1,2]"), Err(CodecError::Structure));
        assert_eq!(codec.decode(b"42"), Err(CodecError::Structure));
    }

    #[test]
    fn test_nesting_limit() {
        let codec = JsonCodec::with_nesting_limit(3);

        // Three levels: root, a, b
        assert!(codec.decode(br#"{"a":{"b":[1]}}"#).is_ok());
        // Four levels
        assert_eq!(
            codec.decode(br#"{"a":{"b":[[1]]}}"#),
            Err(CodecError::TooDeep)
        );
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let doc = JsonCodec::new().decode(br#"{"k":1,"k":2}"#).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("k"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_large_unsigned_decodes_as_float() {
        let doc = JsonCodec::new()
            .decode(br#"{"big":18446744073709551615}"#)
            .unwrap();
        assert_eq!(doc.get("big"), Some(&Value::Float(u64::MAX as f64)));
    }
}
