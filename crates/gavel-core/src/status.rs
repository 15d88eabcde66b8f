//! Status code comparison
//!
//! Status codes are compared for exact equality. The result uses the same
//! component shape as headers and body, with fixed sentinel types.

use serde_json::json;

use crate::media_type::STATUS_CODE;
use crate::report::{ComponentResult, Finding, ValidatorKind};

/// Compare the real status code against the expected one
#[must_use]
pub fn validate_status_code(real: Option<u16>, expected: u16) -> ComponentResult {
    let mut result = ComponentResult {
        real_type: Some(STATUS_CODE.to_string()),
        expected_type: Some(STATUS_CODE.to_string()),
        validator: Some(ValidatorKind::StatusCode),
        raw_data: Some(json!({ "real": real, "expected": expected })),
        results: Vec::new(),
    };

    if real != Some(expected) {
        let real = real.map_or_else(|| "missing".to_string(), |code| code.to_string());
        result.push(Finding::error(format!(
            "Status code is '{real}' instead of '{expected}'"
        )));
    }

    result
}
