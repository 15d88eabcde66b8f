//! Findings and per-component validation results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Severity;

/// One severity-tagged diagnostic attached to a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Comparator chosen for a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ValidatorKind {
    /// Header map against expected header map
    HeadersJsonExample,
    /// JSON body against an example JSON body
    JsonExample,
    /// JSON body against a JSON Schema
    JsonSchema,
    /// Plain text line diff
    TextDiff,
    /// Built-in status code equality
    StatusCode,
}

impl ValidatorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HeadersJsonExample => "HeadersJsonExample",
            Self::JsonExample => "JsonExample",
            Self::JsonSchema => "JsonSchema",
            Self::TextDiff => "TextDiff",
            Self::StatusCode => "StatusCode",
        }
    }
}

impl std::fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validatable part of an HTTP message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Component {
    Headers,
    Body,
    StatusCode,
    /// Reserved slot, always present and never validated
    Version,
}

impl Component {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Headers => "headers",
            Self::Body => "body",
            Self::StatusCode => "statusCode",
            Self::Version => "version",
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inferred types, chosen validator, comparator output and findings for one component.
///
/// `raw_data` is only ever set by a comparator, so it stays `None` whenever
/// `validator` is `None`. `results` is append-only within one validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentResult {
    pub real_type: Option<String>,
    pub expected_type: Option<String>,
    pub validator: Option<ValidatorKind>,
    pub raw_data: Option<Value>,
    #[serde(default)]
    pub results: Vec<Finding>,
}

impl ComponentResult {
    /// Append a finding
    pub fn push(&mut self, finding: Finding) {
        self.results.push(finding);
    }

    /// Whether any finding has error severity
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.results.iter().any(|f| f.severity.is_error())
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.results
            .iter()
            .filter(|f| f.severity.is_error())
            .count()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.results.len() - self.error_count()
    }
}
