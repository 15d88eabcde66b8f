//! Shape classification for raw message fields
//!
//! Message fields arrive as loosely typed JSON values. Every place that
//! needs to know "is this a header map, a text, or neither" goes through
//! [`Payload::decode`] instead of probing the value itself.

use serde_json::{Map, Value};

/// Classified view of a raw field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload<'a> {
    /// Key/value mapping (header maps, parsed JSON Schema documents)
    Mapping(&'a Map<String, Value>),
    /// Textual content (bodies, schemas given as source text)
    Text(&'a str),
    /// Anything else: numbers, arrays, booleans, null
    Invalid(&'a Value),
}

impl<'a> Payload<'a> {
    #[must_use]
    pub fn decode(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Self::Mapping(map),
            Value::String(text) => Self::Text(text),
            other => Self::Invalid(other),
        }
    }

    /// JSON kind name, used in diagnostics
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Mapping(_) => "Object",
            Self::Text(_) => "String",
            Self::Invalid(value) => json_kind(value),
        }
    }
}

/// JSON kind name of a value
#[must_use]
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Boolean",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}
