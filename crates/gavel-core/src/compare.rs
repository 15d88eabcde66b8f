//! Comparator contracts and the failure boundary around them
//!
//! The engine picks a comparator and hands it the data; the algorithms live
//! behind the [`Comparators`] trait. A comparator failure is a typed
//! [`ComparatorError`] that [`absorb`] turns into exactly one error finding,
//! so a broken schema or a broken example never aborts validation.

use serde_json::{Map, Value};
use tracing::warn;

use crate::decode::Payload;
use crate::lint::parse_json;
use crate::message::Expectation;
use crate::report::{ComponentResult, Finding, ValidatorKind};

/// What a comparator produced for one component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    /// Comparator-specific structured output, `None` when there is nothing to show
    pub raw_data: Option<Value>,
    pub findings: Vec<Finding>,
}

impl Comparison {
    #[must_use]
    pub fn new(raw_data: Option<Value>, findings: Vec<Finding>) -> Self {
        Self { raw_data, findings }
    }
}

/// Why a comparator could not compare
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComparatorError {
    #[error("JSON schema is not valid draft v4! {0}")]
    InvalidSchema(String),
    #[error("{0}")]
    Unparseable(String),
    #[error("{0}")]
    Other(String),
}

pub type ComparatorResult = Result<Comparison, ComparatorError>;

/// The four comparison strategies the selection matrix can pick
pub trait Comparators {
    /// Real header map against expected header map (names already lowercased)
    fn headers_json_example(
        &self,
        real: &Map<String, Value>,
        expected: &Map<String, Value>,
    ) -> ComparatorResult;

    /// Real JSON body against an example JSON body
    fn json_example(&self, real: &str, expected: &str) -> ComparatorResult;

    /// Real JSON body against a JSON Schema document
    fn json_schema(&self, real: &str, schema: &Value) -> ComparatorResult;

    /// Real text against expected text
    fn text_diff(&self, real: &str, expected: &str) -> ComparatorResult;
}

/// Fold a comparator outcome into a component.
///
/// Success replaces `raw_data` and appends the findings. Failure appends one
/// error finding carrying the error message and leaves `raw_data` as it was.
pub fn absorb(result: &mut ComponentResult, outcome: ComparatorResult) {
    match outcome {
        Ok(comparison) => {
            result.raw_data = comparison.raw_data;
            result.results.extend(comparison.findings);
        }
        Err(e) => {
            warn!(validator = ?result.validator, error = %e, "comparator failed");
            result.push(Finding::error(e.to_string()));
        }
    }
}

/// Run the selected headers comparator, if any
pub fn run_headers_validator(
    result: &mut ComponentResult,
    comparators: &dyn Comparators,
    real: &Value,
    expected: &Value,
) {
    let Some(validator) = result.validator else {
        return;
    };
    let outcome = match (validator, Payload::decode(real), Payload::decode(expected)) {
        (ValidatorKind::HeadersJsonExample, Payload::Mapping(real), Payload::Mapping(expected)) => {
            comparators.headers_json_example(real, expected)
        }
        (ValidatorKind::HeadersJsonExample, _, _) => Err(ComparatorError::Other(
            "Headers must be a key/value mapping on both sides.".to_string(),
        )),
        (other, _, _) => Err(unsupported(other, "headers")),
    };
    absorb(result, outcome);
}

/// Run the selected body comparator, if any
pub fn run_body_validator(
    result: &mut ComponentResult,
    comparators: &dyn Comparators,
    real: &str,
    expected: &Expectation,
) {
    let Some(validator) = result.validator else {
        return;
    };
    let outcome = match validator {
        ValidatorKind::JsonExample => {
            expected_text(expected).and_then(|body| comparators.json_example(real, body))
        }
        ValidatorKind::TextDiff => {
            expected_text(expected).and_then(|body| comparators.text_diff(real, body))
        }
        ValidatorKind::JsonSchema => {
            expected_schema(expected).and_then(|schema| comparators.json_schema(real, &schema))
        }
        other => Err(unsupported(other, "body")),
    };
    absorb(result, outcome);
}

fn expected_text(expected: &Expectation) -> Result<&str, ComparatorError> {
    match expected.body.as_ref().map(Payload::decode) {
        None => Ok(""),
        Some(Payload::Text(body)) => Ok(body),
        Some(other) => Err(ComparatorError::Other(format!(
            "Expected body must be a String, got {}.",
            other.kind()
        ))),
    }
}

fn expected_schema(expected: &Expectation) -> Result<Value, ComparatorError> {
    match expected.body_schema.as_ref().map(Payload::decode) {
        Some(Payload::Mapping(schema)) => Ok(Value::Object(schema.clone())),
        Some(Payload::Text(source)) => {
            parse_json(source).map_err(|e| ComparatorError::Unparseable(e.to_string()))
        }
        Some(other) => Err(ComparatorError::Other(format!(
            "Expected body JSON Schema is not an Object, got {}.",
            other.kind()
        ))),
        None => Err(ComparatorError::Other(
            "No JSON Schema given for the expected body.".to_string(),
        )),
    }
}

fn unsupported(validator: ValidatorKind, component: &str) -> ComparatorError {
    ComparatorError::Other(format!("Validator '{validator}' cannot validate {component}."))
}
