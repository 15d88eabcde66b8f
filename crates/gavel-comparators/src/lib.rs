//! gavel-comparators: Default comparison strategies for gavel
//!
//! Implements the four comparators the validation engine selects between:
//! header maps, JSON examples, JSON Schema (draft 4) and plain text diffs.

pub mod headers;
pub mod json_example;
pub mod json_schema;
pub mod mismatch;
pub mod text_diff;

use serde_json::{Map, Value};
use tracing::trace;

use gavel_core::{ComparatorResult, Comparators, PreconditionError, Validatable, ValidationReport};

/// The stock comparator set
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultComparators;

impl Comparators for DefaultComparators {
    fn headers_json_example(
        &self,
        real: &Map<String, Value>,
        expected: &Map<String, Value>,
    ) -> ComparatorResult {
        trace!(real = real.len(), expected = expected.len(), "comparing headers");
        Ok(headers::compare_headers(real, expected))
    }

    fn json_example(&self, real: &str, expected: &str) -> ComparatorResult {
        trace!("comparing JSON example");
        json_example::compare_json_example(real, expected)
    }

    fn json_schema(&self, real: &str, schema: &Value) -> ComparatorResult {
        trace!("validating against JSON Schema");
        json_schema::compare_json_schema(real, schema)
    }

    fn text_diff(&self, real: &str, expected: &str) -> ComparatorResult {
        trace!("diffing text");
        Ok(text_diff::compare_text(real, expected))
    }
}

/// Validate a message with the default comparators
///
/// # Errors
///
/// Returns [`PreconditionError`] if the real body is missing or not a string.
pub fn validate<M: Validatable + ?Sized>(
    message: &mut M,
) -> Result<&ValidationReport, PreconditionError> {
    message.validate(&DefaultComparators)
}
