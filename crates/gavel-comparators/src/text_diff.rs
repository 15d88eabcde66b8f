//! Plain text comparison as a unified line diff

use serde_json::Value;
use similar::TextDiff;

use gavel_core::{Comparison, Finding};

/// Context lines around each hunk
const CONTEXT_RADIUS: usize = 3;

/// Diff expected text (old side) against real text (new side)
#[must_use]
pub fn compare_text(real: &str, expected: &str) -> Comparison {
    let diff = TextDiff::from_lines(expected, real);
    let patch = diff
        .unified_diff()
        .context_radius(CONTEXT_RADIUS)
        .header("expected", "real")
        .to_string();

    let findings = if real == expected {
        Vec::new()
    } else {
        vec![Finding::error("Real and expected data does not match.")]
    };
    Comparison::new(Some(Value::String(patch)), findings)
}
