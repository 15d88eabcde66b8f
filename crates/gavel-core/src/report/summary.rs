//! Aggregated validation report
//!
//! Built fresh by every validation run. Validity is derived once at
//! construction: a message is valid iff no present component holds an
//! error-severity finding.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Component, ComponentResult};

/// Per-component results of one validation run plus the overall verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Absent when either side carries no headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<ComponentResult>,
    pub body: ComponentResult,
    /// Absent when no status code is expected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<ComponentResult>,
    /// Reserved slot, always empty
    #[serde(default)]
    pub version: ComponentResult,
    pub valid: bool,
}

impl ValidationReport {
    /// Assemble a report and compute overall validity
    #[must_use]
    pub fn new(
        headers: Option<ComponentResult>,
        body: ComponentResult,
        status_code: Option<ComponentResult>,
    ) -> Self {
        let mut report = Self {
            headers,
            body,
            status_code,
            version: ComponentResult::default(),
            valid: true,
        };
        let valid = report.components().all(|(_, result)| result.is_valid());
        report.valid = valid;
        report
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Result for one component, `None` if it was skipped
    #[must_use]
    pub fn get(&self, component: Component) -> Option<&ComponentResult> {
        match component {
            Component::Headers => self.headers.as_ref(),
            Component::Body => Some(&self.body),
            Component::StatusCode => self.status_code.as_ref(),
            Component::Version => Some(&self.version),
        }
    }

    /// Present components in report order
    pub fn components(&self) -> impl Iterator<Item = (Component, &ComponentResult)> {
        [
            Component::Headers,
            Component::Body,
            Component::StatusCode,
            Component::Version,
        ]
        .into_iter()
        .filter_map(|c| self.get(c).map(|r| (c, r)))
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.components().map(|(_, r)| r.error_count()).sum()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.components().map(|(_, r)| r.warning_count()).sum()
    }

    /// Format for terminal output
    #[must_use]
    pub fn to_terminal(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "Validation: {} (errors: {}, warnings: {})",
            verdict_label(self.valid),
            self.error_count(),
            self.warning_count(),
        ));

        for (component, result) in self.components() {
            if component == Component::Version {
                continue;
            }
            lines.push(String::new());
            lines.push(format!("{component}: {}", verdict_label(result.is_valid())));
            lines.push(format!("  real type:     {}", or_dash(result.real_type.as_deref())));
            lines.push(format!(
                "  expected type: {}",
                or_dash(result.expected_type.as_deref())
            ));
            lines.push(format!(
                "  validator:     {}",
                or_dash(result.validator.map(|v| v.as_str()))
            ));
            for finding in &result.results {
                let label = finding.severity.as_str().to_uppercase();
                let mut message_lines = finding.message.lines();
                let first = message_lines.next().unwrap_or_default();
                lines.push(format!("  [{label}] {first}"));
                for rest in message_lines {
                    lines.push(format!("    {rest}"));
                }
            }
        }

        lines.join("\n")
    }
}

fn verdict_label(valid: bool) -> &'static str {
    if valid { "PASS" } else { "FAIL" }
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
