//! Shared raw-data shape for structural comparators
//!
//! ```json
//! { "length": 1, "errors": [ { "property": "/name", "message": "..." } ] }
//! ```

use serde::Serialize;

use gavel_core::{Comparison, Finding};

/// One structural difference between real and expected data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    /// Where the difference is, when the comparator can tell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    pub message: String,
}

impl Mismatch {
    #[must_use]
    pub fn at(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property: Some(property.into()),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unlocated(message: impl Into<String>) -> Self {
        Self {
            property: None,
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
struct RawData<'a> {
    length: usize,
    errors: &'a [Mismatch],
}

/// Raw data plus one error finding per mismatch
#[must_use]
pub fn into_comparison(mismatches: Vec<Mismatch>) -> Comparison {
    let raw = serde_json::to_value(RawData {
        length: mismatches.len(),
        errors: &mismatches,
    })
    .ok();
    let findings = mismatches
        .into_iter()
        .map(|m| Finding::error(m.message))
        .collect();
    Comparison::new(raw, findings)
}

/// Append a key to a JSON Pointer
#[must_use]
pub fn pointer_join(base: &str, key: &str) -> String {
    format!("{base}/{}", key.replace('~', "~0").replace('/', "~1"))
}

/// JSON Pointer for display, `/` for the document root
#[must_use]
pub fn display_pointer(pointer: &str) -> &str {
    if pointer.is_empty() { "/" } else { pointer }
}
