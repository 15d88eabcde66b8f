//! Loading test-case fixtures from disk
//!
//! A fixture is one [`HttpMessage`]: real fields at top level, the
//! expectation under `expected`. JSON, YAML and TOML are accepted.

use std::path::{Path, PathBuf};

use crate::message::HttpMessage;

/// Fixture file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureFormat {
    Json,
    Yaml,
    Toml,
}

impl FixtureFormat {
    /// Format by file extension: `.json`, `.yaml`/`.yml`, anything else is TOML
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::Json,
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Toml,
        }
    }
}

impl HttpMessage {
    /// Load a fixture file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FixtureError::Io(path.to_path_buf(), e.to_string()))?;
        Self::parse(&content, FixtureFormat::from_path(path))
    }

    /// Parse fixture text in the given format
    ///
    /// # Errors
    ///
    /// Returns error if the text is not a valid message in that format
    pub fn parse(content: &str, format: FixtureFormat) -> Result<Self, FixtureError> {
        match format {
            FixtureFormat::Json => {
                serde_json::from_str(content).map_err(|e| FixtureError::Parse(e.to_string()))
            }
            FixtureFormat::Yaml => {
                serde_yml::from_str(content).map_err(|e| FixtureError::Parse(e.to_string()))
            }
            FixtureFormat::Toml => {
                toml::from_str(content).map_err(|e| FixtureError::Parse(e.to_string()))
            }
        }
    }

    /// Example fixture file
    #[must_use]
    pub fn example() -> &'static str {
        r#"# gavel test case

# "request" or "response"
kind = "response"

# Real message
statusCode = 200
body = '{"id": 1, "name": "Ada"}'

[headers]
Content-Type = "application/json"

# Expected message: every field is optional
[expected]
statusCode = 200
body = '{"id": 0, "name": ""}'
# Validate against a JSON Schema instead of an example body
# bodySchema = '{"type": "object", "required": ["id"]}'

[expected.headers]
Content-Type = "application/json"
"#
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Cannot read {0}: {1}")]
    Io(PathBuf, String),
    #[error("Parse error: {0}")]
    Parse(String),
}
