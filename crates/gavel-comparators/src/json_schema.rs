//! JSON body validation against a draft 4 JSON Schema

use serde_json::Value;

use gavel_core::lint::parse_json;
use gavel_core::{ComparatorError, ComparatorResult};

use crate::mismatch::{Mismatch, into_comparison};

/// Validate a real JSON body against a JSON Schema
///
/// # Errors
///
/// Returns [`ComparatorError::InvalidSchema`] if the schema is not a valid
/// draft 4 schema, or [`ComparatorError::Unparseable`] if the body is not JSON.
pub fn compare_json_schema(real: &str, schema: &Value) -> ComparatorResult {
    let validator = jsonschema::options()
        .with_draft(jsonschema::Draft::Draft4)
        .build(schema)
        .map_err(|e| ComparatorError::InvalidSchema(e.to_string()))?;

    let instance = parse_json(real).map_err(|e| {
        ComparatorError::Unparseable(format!("Real body is not a parseable JSON:\n{e}"))
    })?;

    let mismatches: Vec<Mismatch> = validator
        .iter_errors(&instance)
        .map(|e| Mismatch::at(e.instance_path().as_str(), e.to_string()))
        .collect();
    Ok(into_comparison(mismatches))
}
