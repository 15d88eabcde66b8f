//! Severity levels for validation findings
//!
//! Only `Error` decides validity; warnings are reported but never fail a message.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Finding severity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth reporting, does not affect validity
    Warning,
    /// The real message does not conform
    Error,
}

impl Severity {
    /// Whether a finding of this severity makes its component invalid
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }

    /// Human-readable label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
