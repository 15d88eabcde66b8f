//! Validation pipeline
//!
//! One run: headers → body → status code → aggregate. Every step reads the
//! borrowed message view and writes into a fresh [`ComponentResult`]; the
//! finished [`ValidationReport`] is a new value each time.

use serde_json::Value;
use tracing::debug;

use crate::compare::{self, Comparators};
use crate::decode::Payload;
use crate::message::Expectation;
use crate::report::{Component, ComponentResult, ValidationReport};
use crate::{resolve, select, status};

/// Fields of a message as the engine reads them
#[derive(Debug, Clone, Copy)]
pub struct MessageView<'a> {
    pub headers: Option<&'a Value>,
    pub body: Option<&'a Value>,
    pub status_code: Option<u16>,
    pub expected: &'a Expectation,
    /// Components the message type validates
    pub components: &'a [Component],
}

/// Caller misuse that no finding can describe
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionError {
    #[error("Real body is missing, validation requires a String")]
    MissingBody,
    #[error("Real body must be a String, got {found}")]
    BodyNotString { found: &'static str },
}

/// Validate one message view into a fresh report.
///
/// # Errors
///
/// Returns [`PreconditionError`] if the real body is missing or not a string.
pub fn validate(
    view: MessageView<'_>,
    comparators: &dyn Comparators,
) -> Result<ValidationReport, PreconditionError> {
    let headers = match (view.headers, view.expected.headers.as_ref()) {
        (Some(real), Some(expected)) if view.components.contains(&Component::Headers) => {
            Some(validate_headers(comparators, real, expected))
        }
        _ => {
            debug!("headers validation skipped");
            None
        }
    };

    let body = validate_body(comparators, view.headers, view.body, view.expected)?;

    let status_code = match view.expected.status_code {
        Some(expected) if view.components.contains(&Component::StatusCode) => {
            Some(status::validate_status_code(view.status_code, expected))
        }
        _ => None,
    };

    let report = ValidationReport::new(headers, body, status_code);
    debug!(
        valid = report.valid,
        errors = report.error_count(),
        "validation finished"
    );
    Ok(report)
}

/// Resolve header types, pick a validator, and run it
pub fn validate_headers(
    comparators: &dyn Comparators,
    real: &Value,
    expected: &Value,
) -> ComponentResult {
    let mut result = ComponentResult::default();
    resolve::resolve_headers_real_type(&mut result, real);
    resolve::resolve_headers_expected_type(&mut result, expected);
    select::select_headers_validator(&mut result);
    compare::run_headers_validator(&mut result, comparators, real, expected);
    result
}

/// Resolve body types, pick a validator, and run it.
///
/// # Errors
///
/// Returns [`PreconditionError`] if the real body is missing or not a string.
pub fn validate_body(
    comparators: &dyn Comparators,
    real_headers: Option<&Value>,
    real_body: Option<&Value>,
    expected: &Expectation,
) -> Result<ComponentResult, PreconditionError> {
    let real = match real_body.map(Payload::decode) {
        Some(Payload::Text(text)) => text,
        Some(other) => return Err(PreconditionError::BodyNotString { found: other.kind() }),
        None => return Err(PreconditionError::MissingBody),
    };

    let mut result = ComponentResult::default();
    resolve::resolve_body_real_type(&mut result, real_headers, real);
    resolve::resolve_body_expected_type(&mut result, expected);
    select::select_body_validator(&mut result);
    compare::run_body_validator(&mut result, comparators, real, expected);
    Ok(result)
}
