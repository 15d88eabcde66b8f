//! Content-type resolution for the headers and body components
//!
//! Each resolver fills `real_type` / `expected_type` on a component result
//! and appends an error finding when the data contradicts its declared type.
//! Findings are only ever appended.

use serde_json::Value;
use tracing::trace;

use crate::decode::Payload;
use crate::headers;
use crate::lint::parse_json;
use crate::media_type::{self, HTTP_HEADERS_JSON, JSON, SCHEMA_JSON, TEXT_PLAIN};
use crate::message::Expectation;
use crate::report::{ComponentResult, Finding};

/// Type of a headers value: mappings are header maps, anything else has no type
#[must_use]
pub fn headers_type(headers: &Value) -> Option<String> {
    match Payload::decode(headers) {
        Payload::Mapping(_) => Some(HTTP_HEADERS_JSON.to_string()),
        Payload::Text(_) | Payload::Invalid(_) => None,
    }
}

pub fn resolve_headers_real_type(result: &mut ComponentResult, real: &Value) {
    result.real_type = headers_type(real);
}

pub fn resolve_headers_expected_type(result: &mut ComponentResult, expected: &Value) {
    result.expected_type = headers_type(expected);
}

/// Outcome of inferring a body type from its content-type header and text
enum BodyType {
    Known(String),
    /// JSON content type declared but the body does not parse
    Broken {
        content_type: String,
        detail: String,
    },
}

fn infer_body_type(content_type: Option<&str>, body: &str) -> BodyType {
    match content_type {
        Some(ct) if media_type::is_json_content_type(Some(ct)) => match parse_json(body) {
            Ok(_) => BodyType::Known(ct.to_string()),
            Err(e) => BodyType::Broken {
                content_type: ct.to_string(),
                detail: e.to_string(),
            },
        },
        _ => {
            if parse_json(body).is_ok() {
                BodyType::Known(JSON.to_string())
            } else {
                BodyType::Known(TEXT_PLAIN.to_string())
            }
        }
    }
}

/// Infer the real body type from the real `content-type` header and body text
pub fn resolve_body_real_type(result: &mut ComponentResult, headers: Option<&Value>, body: &str) {
    match infer_body_type(headers::content_type(headers), body) {
        BodyType::Known(media) => result.real_type = Some(media),
        BodyType::Broken {
            content_type,
            detail,
        } => {
            result.real_type = None;
            result.push(Finding::error(format!(
                "Real body 'Content-Type' header is '{content_type}' but body is not a parseable JSON:\n{detail}"
            )));
        }
    }
    trace!(real_type = ?result.real_type, "resolved real body type");
}

/// Infer the expected body type: a body schema wins over the expected body
pub fn resolve_body_expected_type(result: &mut ComponentResult, expected: &Expectation) {
    if let Some(schema) = &expected.body_schema {
        resolve_schema_type(result, schema);
    } else {
        match expected.body.as_ref().map(Payload::decode) {
            Some(Payload::Text(body)) => resolve_expected_example_type(result, expected, body),
            None => resolve_expected_example_type(result, expected, ""),
            Some(Payload::Mapping(_) | Payload::Invalid(_)) => result.expected_type = None,
        }
    }
    trace!(expected_type = ?result.expected_type, "resolved expected body type");
}

fn resolve_expected_example_type(result: &mut ComponentResult, expected: &Expectation, body: &str) {
    let content_type = headers::content_type(expected.headers.as_ref());
    match infer_body_type(content_type, body) {
        BodyType::Known(media) => result.expected_type = Some(media),
        BodyType::Broken {
            content_type,
            detail,
        } => {
            result.expected_type = None;
            result.push(Finding::error(format!(
                "Can't validate. Expected body 'Content-Type' is '{content_type}' but body is not a parseable JSON:\n{detail}"
            )));
        }
    }
}

fn resolve_schema_type(result: &mut ComponentResult, schema: &Value) {
    let failure = match Payload::decode(schema) {
        Payload::Mapping(_) => None,
        Payload::Text(source) => match parse_json(source) {
            Ok(Value::Object(_)) => None,
            Ok(other) => Some(format!(
                "Can't validate. Expected body JSON Schema is not an Object, got {}.",
                crate::decode::json_kind(&other)
            )),
            Err(e) => Some(format!(
                "Can't validate. Expected body JSON Schema is not a parseable JSON:\n{e}"
            )),
        },
        invalid @ Payload::Invalid(_) => Some(format!(
            "Can't validate. Expected body JSON Schema is not an Object, got {}.",
            invalid.kind()
        )),
    };

    match failure {
        None => result.expected_type = Some(SCHEMA_JSON.to_string()),
        Some(message) => {
            result.expected_type = None;
            result.push(Finding::error(message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Severity;
    use serde_json::json;

    const BROKEN_JSON: &str = r#"{"creative?": false, 'creativ': true }"#;
    const JSON_TYPES: [&str; 3] = [
        "application/json",
        "application/json; charset=utf-8",
        "application/hal+json",
    ];

    fn with_content_type(ct: &str) -> Value {
        json!({ "content-type": ct })
    }

    #[test]
    fn headers_mapping_has_headers_type() {
        let mut result = ComponentResult::default();
        resolve_headers_real_type(&mut result, &json!({"accept": "*/*"}));
        resolve_headers_expected_type(&mut result, &json!({}));
        assert_eq!(result.real_type.as_deref(), Some(HTTP_HEADERS_JSON));
        assert_eq!(result.expected_type.as_deref(), Some(HTTP_HEADERS_JSON));
    }

    #[test]
    fn headers_string_has_no_type() {
        let mut result = ComponentResult::default();
        resolve_headers_real_type(&mut result, &json!("string"));
        resolve_headers_expected_type(&mut result, &json!("string"));
        assert_eq!(result.real_type, None);
        assert_eq!(result.expected_type, None);
        assert!(result.results.is_empty());
    }

    #[test]
    fn json_content_type_with_parseable_body_keeps_header_value() {
        for ct in JSON_TYPES {
            let mut result = ComponentResult::default();
            resolve_body_real_type(&mut result, Some(&with_content_type(ct)), r#"{"foo": "bar"}"#);
            assert_eq!(result.real_type.as_deref(), Some(ct));
            assert!(result.results.is_empty());
        }
    }

    #[test]
    fn json_content_type_with_broken_body_is_an_error() {
        for ct in JSON_TYPES {
            let mut result = ComponentResult::default();
            resolve_body_real_type(&mut result, Some(&with_content_type(ct)), BROKEN_JSON);

            assert_eq!(result.real_type, None);
            assert_eq!(result.results.len(), 1);
            assert_eq!(result.results[0].severity, Severity::Error);
            let expected = format!(
                "Real body 'Content-Type' header is '{ct}' but body is not a parseable JSON:\n\
                 Unexpected token '\\'' at 1:22\n\
                 {BROKEN_JSON}\n\
                 {}^",
                " ".repeat(21)
            );
            assert_eq!(result.results[0].message, expected);
        }
    }

    #[test]
    fn rerun_appends_to_existing_errors() {
        let headers = with_content_type("application/json");
        let mut result = ComponentResult::default();
        result.push(Finding::error("Something happened."));

        resolve_body_real_type(&mut result, Some(&headers), BROKEN_JSON);
        assert_eq!(result.results.len(), 2);
        assert_eq!(result.results[0].message, "Something happened.");
    }

    #[test]
    fn no_content_type_falls_back_on_parse() {
        let mut result = ComponentResult::default();
        resolve_body_real_type(&mut result, None, r#"{"foo": "bar"}"#);
        assert_eq!(result.real_type.as_deref(), Some(JSON));

        resolve_body_real_type(&mut result, None, "Booboo foo bar john doe");
        assert_eq!(result.real_type.as_deref(), Some(TEXT_PLAIN));
        assert!(result.results.is_empty());
    }

    #[test]
    fn non_json_content_type_falls_back_on_parse() {
        let headers = with_content_type("text/html");
        let mut result = ComponentResult::default();
        resolve_body_real_type(&mut result, Some(&headers), "[1, 2]");
        assert_eq!(result.real_type.as_deref(), Some(JSON));
    }

    #[test]
    fn schema_object_is_schema_type() {
        let expected = Expectation::default().with_body_schema(json!({"type": "object"}));
        let mut result = ComponentResult::default();
        resolve_body_expected_type(&mut result, &expected);
        assert_eq!(result.expected_type.as_deref(), Some(SCHEMA_JSON));
        assert!(result.results.is_empty());
    }

    #[test]
    fn schema_text_parsing_to_object_is_schema_type() {
        let expected = Expectation::default().with_body_schema(r#"{"type": "object"}"#);
        let mut result = ComponentResult::default();
        resolve_body_expected_type(&mut result, &expected);
        assert_eq!(result.expected_type.as_deref(), Some(SCHEMA_JSON));
        assert!(result.results.is_empty());
    }

    #[test]
    fn schema_text_parsing_to_non_object_is_an_error() {
        let expected = Expectation::default().with_body_schema("1");
        let mut result = ComponentResult::default();
        resolve_body_expected_type(&mut result, &expected);
        assert_eq!(result.expected_type, None);
        assert_eq!(result.error_count(), 1);
        assert!(result.results[0].message.contains("Number"));
    }

    #[test]
    fn unparseable_schema_text_is_an_error() {
        let expected = Expectation::default().with_body_schema("{Boo{Boo");
        let mut result = ComponentResult::default();
        resolve_body_expected_type(&mut result, &expected);
        assert_eq!(result.expected_type, None);
        assert_eq!(result.error_count(), 1);
        assert!(result.results[0].message.contains("not a parseable JSON"));
    }

    #[test]
    fn expected_json_content_type_with_parseable_body() {
        for ct in JSON_TYPES {
            let expected = Expectation::default()
                .with_header("content-type", ct)
                .with_body(r#"{"foo": "bar"}"#);
            let mut result = ComponentResult::default();
            resolve_body_expected_type(&mut result, &expected);
            assert_eq!(result.expected_type.as_deref(), Some(ct));
            assert!(result.results.is_empty());
        }
    }

    #[test]
    fn expected_json_content_type_with_broken_body() {
        for ct in JSON_TYPES {
            let expected = Expectation::default()
                .with_header("content-type", ct)
                .with_body(BROKEN_JSON);
            let mut result = ComponentResult::default();
            resolve_body_expected_type(&mut result, &expected);

            assert_eq!(result.expected_type, None);
            assert_eq!(result.error_count(), 1);
            let expected = format!(
                "Can't validate. Expected body 'Content-Type' is '{ct}' but body is not a parseable JSON:\n\
                 Unexpected token '\\'' at 1:22\n\
                 {BROKEN_JSON}\n\
                 {}^",
                " ".repeat(21)
            );
            assert_eq!(result.results[0].message, expected);
        }
    }

    #[test]
    fn expected_without_json_header_falls_back_on_parse() {
        let mut result = ComponentResult::default();
        resolve_body_expected_type(&mut result, &Expectation::default().with_body("{}"));
        assert_eq!(result.expected_type.as_deref(), Some(JSON));

        resolve_body_expected_type(&mut result, &Expectation::default().with_body("{Boo{Boo"));
        assert_eq!(result.expected_type.as_deref(), Some(TEXT_PLAIN));
        assert!(result.results.is_empty());
    }

    #[test]
    fn absent_expected_body_is_empty_text() {
        let mut result = ComponentResult::default();
        resolve_body_expected_type(&mut result, &Expectation::default());
        assert_eq!(result.expected_type.as_deref(), Some(TEXT_PLAIN));
    }

    #[test]
    fn non_string_expected_body_has_no_type() {
        let expected = Expectation {
            body: Some(json!({"a": 1})),
            ..Default::default()
        };
        let mut result = ComponentResult::default();
        resolve_body_expected_type(&mut result, &expected);
        assert_eq!(result.expected_type, None);
        assert!(result.results.is_empty());
    }
}
