//! Report module - findings, per-component results, and the aggregated report

mod finding;
mod severity;
mod summary;

pub use finding::{Component, ComponentResult, Finding, ValidatorKind};
pub use severity::Severity;
pub use summary::ValidationReport;

/// Generate the JSON Schema describing a serialized [`ValidationReport`]
///
/// # Errors
///
/// Returns a serialization error if the schema cannot be rendered.
pub fn generate_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(ValidationReport);
    serde_json::to_string_pretty(&schema)
}
