//! HTTP message types and the validation capability they share
//!
//! A message holds the real fields at top level and the expectation under
//! `expected`. Fields stay loosely typed (`serde_json::Value`) because the
//! engine itself decides what a malformed field means: a non-mapping header
//! value is "no type", a non-string real body is a caller error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::compare::Comparators;
use crate::engine::{self, MessageView, PreconditionError};
use crate::headers;
use crate::report::{Component, ValidationReport};

/// What the real message is expected to look like
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expectation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// JSON Schema as an object or as JSON source text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_schema: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl Expectation {
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        headers::insert(&mut self.headers, name, value);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(Value::String(body.into()));
        self
    }

    /// Expect the body to match a JSON Schema (object or JSON text)
    #[must_use]
    pub fn with_body_schema(mut self, schema: impl Into<Value>) -> Self {
        self.body_schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }
}

/// Validation shared by requests and responses.
///
/// Implementors only expose their fields; the pipeline lives in the
/// provided methods.
pub trait Validatable {
    /// Components this message type validates
    fn validatable_components(&self) -> &'static [Component];

    /// Borrowed view of the fields the engine reads
    fn view(&self) -> MessageView<'_>;

    /// Real and expected header slots
    fn header_slots(&mut self) -> [Option<&mut Value>; 2];

    /// Slot holding the report of the last validation run
    fn validation_slot(&mut self) -> &mut Option<ValidationReport>;

    /// Report of the last validation run, if any
    fn validation(&self) -> Option<&ValidationReport>;

    /// Lowercase header names on both the real and the expected side
    fn lowercase_headers(&mut self) {
        for slot in self.header_slots().into_iter().flatten() {
            headers::lowercase_keys(slot);
        }
    }

    /// Validate from the current field values, replacing any previous report.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError`] if the real body is missing or not a
    /// string. The previous report is discarded either way.
    fn validate(
        &mut self,
        comparators: &dyn Comparators,
    ) -> Result<&ValidationReport, PreconditionError> {
        *self.validation_slot() = None;
        self.lowercase_headers();
        let report = engine::validate(self.view(), comparators)?;
        Ok(self.validation_slot().insert(report))
    }

    /// Stored report, validating first if there is none yet.
    ///
    /// The report is a snapshot of the last run: editing the message
    /// afterwards does not change it until [`Validatable::validate`] runs again.
    ///
    /// # Errors
    ///
    /// See [`Validatable::validate`].
    fn validation_results(
        &mut self,
        comparators: &dyn Comparators,
    ) -> Result<&ValidationReport, PreconditionError> {
        let report = match self.validation_slot().take() {
            Some(report) => report,
            None => {
                self.lowercase_headers();
                engine::validate(self.view(), comparators)?
            }
        };
        Ok(self.validation_slot().insert(report))
    }

    /// Overall validity of the stored (or freshly computed) report
    ///
    /// # Errors
    ///
    /// See [`Validatable::validate`].
    fn is_valid(&mut self, comparators: &dyn Comparators) -> Result<bool, PreconditionError> {
        Ok(self.validation_results(comparators)?.is_valid())
    }
}

/// A real HTTP request with its expectation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequest {
    /// Informational, not validated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Informational, not validated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default)]
    pub expected: Expectation,
    #[serde(skip)]
    validation: Option<ValidationReport>,
}

impl HttpRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>, uri: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self.uri = Some(uri.into());
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        headers::insert(&mut self.headers, name, value);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(Value::String(body.into()));
        self
    }

    #[must_use]
    pub fn expecting(mut self, expected: Expectation) -> Self {
        self.expected = expected;
        self
    }
}

impl Validatable for HttpRequest {
    fn validatable_components(&self) -> &'static [Component] {
        &[Component::Headers, Component::Body]
    }

    fn view(&self) -> MessageView<'_> {
        MessageView {
            headers: self.headers.as_ref(),
            body: self.body.as_ref(),
            status_code: None,
            expected: &self.expected,
            components: self.validatable_components(),
        }
    }

    fn header_slots(&mut self) -> [Option<&mut Value>; 2] {
        [self.headers.as_mut(), self.expected.headers.as_mut()]
    }

    fn validation_slot(&mut self) -> &mut Option<ValidationReport> {
        &mut self.validation
    }

    fn validation(&self) -> Option<&ValidationReport> {
        self.validation.as_ref()
    }
}

/// A real HTTP response with its expectation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default)]
    pub expected: Expectation,
    #[serde(skip)]
    validation: Option<ValidationReport>,
}

impl HttpResponse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        headers::insert(&mut self.headers, name, value);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(Value::String(body.into()));
        self
    }

    #[must_use]
    pub fn expecting(mut self, expected: Expectation) -> Self {
        self.expected = expected;
        self
    }
}

impl Validatable for HttpResponse {
    fn validatable_components(&self) -> &'static [Component] {
        &[Component::Headers, Component::Body, Component::StatusCode]
    }

    fn view(&self) -> MessageView<'_> {
        MessageView {
            headers: self.headers.as_ref(),
            body: self.body.as_ref(),
            status_code: self.status_code,
            expected: &self.expected,
            components: self.validatable_components(),
        }
    }

    fn header_slots(&mut self) -> [Option<&mut Value>; 2] {
        [self.headers.as_mut(), self.expected.headers.as_mut()]
    }

    fn validation_slot(&mut self) -> &mut Option<ValidationReport> {
        &mut self.validation
    }

    fn validation(&self) -> Option<&ValidationReport> {
        self.validation.as_ref()
    }
}

/// Either kind of HTTP message, tagged by `kind` when (de)serialized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HttpMessage {
    Request(HttpRequest),
    Response(HttpResponse),
}

impl From<HttpRequest> for HttpMessage {
    fn from(request: HttpRequest) -> Self {
        Self::Request(request)
    }
}

impl From<HttpResponse> for HttpMessage {
    fn from(response: HttpResponse) -> Self {
        Self::Response(response)
    }
}

impl Validatable for HttpMessage {
    fn validatable_components(&self) -> &'static [Component] {
        match self {
            Self::Request(m) => m.validatable_components(),
            Self::Response(m) => m.validatable_components(),
        }
    }

    fn view(&self) -> MessageView<'_> {
        match self {
            Self::Request(m) => m.view(),
            Self::Response(m) => m.view(),
        }
    }

    fn header_slots(&mut self) -> [Option<&mut Value>; 2] {
        match self {
            Self::Request(m) => m.header_slots(),
            Self::Response(m) => m.header_slots(),
        }
    }

    fn validation_slot(&mut self) -> &mut Option<ValidationReport> {
        match self {
            Self::Request(m) => m.validation_slot(),
            Self::Response(m) => m.validation_slot(),
        }
    }

    fn validation(&self) -> Option<&ValidationReport> {
        match self {
            Self::Request(m) => m.validation(),
            Self::Response(m) => m.validation(),
        }
    }
}
