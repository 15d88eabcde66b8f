//! Validator selection matrix
//!
//! Maps resolved (real, expected) media types to the comparator that can
//! compare them. Pure: never parses data, only looks at the types and at
//! whether type resolution already failed.

use tracing::debug;

use crate::media_type::{self, HTTP_HEADERS_JSON, SCHEMA_JSON, TEXT_PLAIN};
use crate::report::{ComponentResult, Finding, ValidatorKind};

/// Comparator for a headers component, if the type pair is supported
#[must_use]
pub fn headers_validator_for(
    real_type: Option<&str>,
    expected_type: Option<&str>,
) -> Option<ValidatorKind> {
    match (real_type, expected_type) {
        (Some(HTTP_HEADERS_JSON), Some(HTTP_HEADERS_JSON)) => {
            Some(ValidatorKind::HeadersJsonExample)
        }
        _ => None,
    }
}

/// Comparator for a body component, if the type pair is supported.
///
/// A schema expectation takes precedence over the JSON example rule, since
/// `application/schema+json` is itself a JSON family type.
#[must_use]
pub fn body_validator_for(
    real_type: Option<&str>,
    expected_type: Option<&str>,
) -> Option<ValidatorKind> {
    let real_is_json = media_type::is_json_content_type(real_type);
    match expected_type {
        Some(SCHEMA_JSON) if real_is_json => Some(ValidatorKind::JsonSchema),
        Some(expected) if real_is_json && media_type::is_json_content_type(Some(expected)) => {
            Some(ValidatorKind::JsonExample)
        }
        Some(TEXT_PLAIN) if real_type == Some(TEXT_PLAIN) => Some(ValidatorKind::TextDiff),
        _ => None,
    }
}

/// Pick the headers validator, recording an error when there is none
pub fn select_headers_validator(result: &mut ComponentResult) {
    result.validator =
        headers_validator_for(result.real_type.as_deref(), result.expected_type.as_deref());
    if result.validator.is_none() {
        result.push(no_validator(result));
    }
    debug!(validator = ?result.validator, "selected headers validator");
}

/// Pick the body validator.
///
/// If type resolution already recorded an error there is nothing sensible
/// to compare: no validator is set and no further finding is added.
pub fn select_body_validator(result: &mut ComponentResult) {
    if result.has_errors() {
        result.validator = None;
        debug!("body validation skipped after type resolution error");
        return;
    }
    result.validator =
        body_validator_for(result.real_type.as_deref(), result.expected_type.as_deref());
    if result.validator.is_none() {
        result.push(no_validator(result));
    }
    debug!(validator = ?result.validator, "selected body validator");
}

fn no_validator(result: &ComponentResult) -> Finding {
    Finding::error(format!(
        "No validator found for real data media type '{}' and expected data media type '{}'.",
        result.real_type.as_deref().unwrap_or("null"),
        result.expected_type.as_deref().unwrap_or("null"),
    ))
}
