//! Header map comparison
//!
//! Every expected header must be present. Values must match too, except for
//! headers whose value is different on every response anyway.

use serde_json::{Map, Value};

use gavel_core::Comparison;
use gavel_core::media_type;

use crate::mismatch::{Mismatch, into_comparison};

/// Headers checked for presence only
const VOLATILE_HEADERS: &[&str] = &[
    "date",
    "expires",
    "last-modified",
    "etag",
    "content-length",
    "set-cookie",
];

/// Compare lowercased header maps
#[must_use]
pub fn compare_headers(real: &Map<String, Value>, expected: &Map<String, Value>) -> Comparison {
    let mut mismatches = Vec::new();

    for (name, expected_value) in expected {
        let Some(real_value) = real.get(name) else {
            mismatches.push(Mismatch::at(
                name.as_str(),
                format!("Header '{name}' is missing"),
            ));
            continue;
        };
        if VOLATILE_HEADERS.contains(&name.as_str()) {
            continue;
        }

        let real_text = header_text(real_value);
        let expected_text = header_text(expected_value);
        let matches = if name == "content-type" {
            normalize_content_type(&real_text) == normalize_content_type(&expected_text)
        } else {
            real_text == expected_text
        };
        if !matches {
            mismatches.push(Mismatch::at(
                name.as_str(),
                format!("Header '{name}' has value '{real_text}' instead of '{expected_text}'"),
            ));
        }
    }

    into_comparison(mismatches)
}

fn header_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `Application/JSON ;charset=utf-8` → `application/json; charset=utf-8`
fn normalize_content_type(value: &str) -> String {
    let mut parts = vec![media_type::essence(value).to_ascii_lowercase()];
    parts.extend(
        value
            .split(';')
            .skip(1)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string),
    );
    parts.join("; ")
}
