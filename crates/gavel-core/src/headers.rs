//! Header map normalization and lookup
//!
//! Header names are case-insensitive; everything downstream reads them
//! lowercased, so normalization runs before any header or content-type logic.

use serde_json::{Map, Value};

use crate::decode::Payload;

/// Lowercase every key of a header map in place. Non-mappings are left untouched.
///
/// Values are preserved. If two names collide after lowercasing, the one
/// enumerated last wins.
pub fn lowercase_keys(headers: &mut Value) {
    if let Value::Object(map) = headers {
        if map.keys().all(|k| *k == k.to_lowercase()) {
            return;
        }
        *map = std::mem::take(map)
            .into_iter()
            .map(|(name, value)| (name.to_lowercase(), value))
            .collect();
    }
}

/// Value of a header looked up by its lowercase name
#[must_use]
pub fn get<'a>(headers: Option<&'a Value>, name: &str) -> Option<&'a str> {
    match headers.map(Payload::decode)? {
        Payload::Mapping(map) => map.get(name).and_then(Value::as_str),
        _ => None,
    }
}

/// The `content-type` header, if any
#[must_use]
pub fn content_type(headers: Option<&Value>) -> Option<&str> {
    get(headers, "content-type")
}

/// Set a header, turning a missing or non-mapping slot into an empty map first
pub fn insert(headers: &mut Option<Value>, name: impl Into<String>, value: impl Into<String>) {
    let slot = headers.get_or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    if let Value::Object(map) = slot {
        map.insert(name.into(), Value::String(value.into()));
    }
}
