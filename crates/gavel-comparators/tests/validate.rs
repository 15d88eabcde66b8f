//! End-to-end validation runs with the default comparators

use gavel_comparators::{DefaultComparators, validate};
use gavel_core::media_type::{HTTP_HEADERS_JSON, SCHEMA_JSON, TEXT_PLAIN};
use gavel_core::{
    Expectation, HttpMessage, HttpRequest, HttpResponse, PreconditionError, Severity, Validatable,
    ValidatorKind,
};
use serde_json::json;

const JSON_TYPES: [&str; 3] = [
    "application/json",
    "application/json; charset=utf-8",
    "application/hal+json",
];

#[test]
fn json_content_types_are_kept_verbatim() {
    for ct in JSON_TYPES {
        let mut response = HttpResponse::new()
            .with_header("Content-Type", ct)
            .with_body(r#"{"foo":"bar"}"#)
            .expecting(Expectation::default().with_body(r#"{"foo": ""}"#));
        let report = validate(&mut response).unwrap();

        assert_eq!(report.body.real_type.as_deref(), Some(ct));
        assert!(report.body.results.is_empty(), "{ct}: {:?}", report.body.results);
        assert_eq!(report.body.validator, Some(ValidatorKind::JsonExample));
        assert!(report.is_valid());
    }
}

#[test]
fn broken_json_body_yields_one_lint_finding() {
    let mut response = HttpResponse::new()
        .with_header("content-type", "application/json")
        .with_body(r#"{"creative?": false, 'creativ': true }"#)
        .expecting(Expectation::default().with_body("{}"));
    let report = validate(&mut response).unwrap();

    assert_eq!(report.body.real_type, None);
    assert_eq!(report.body.validator, None);
    assert_eq!(report.body.raw_data, None);
    assert_eq!(report.body.results.len(), 1);

    let message = &report.body.results[0].message;
    assert!(message.contains("Unexpected token"));
    assert!(message.ends_with(&format!("\n{}^", " ".repeat(21))));
    assert!(!report.is_valid());
}

#[test]
fn status_code_mismatch() {
    let mut response = HttpResponse::new()
        .with_status_code(200)
        .with_body("")
        .expecting(Expectation::default().with_status_code(201));
    let report = validate(&mut response).unwrap().clone();

    let status = report.status_code.as_ref().unwrap();
    assert_eq!(status.results.len(), 1);
    assert_eq!(status.results[0].message, "Status code is '200' instead of '201'");
    assert!(!response.is_valid(&DefaultComparators).unwrap());
}

#[test]
fn matching_status_code_has_no_results() {
    let mut response = HttpResponse::new()
        .with_status_code(204)
        .with_body("")
        .expecting(Expectation::default().with_status_code(204));
    let report = validate(&mut response).unwrap();
    assert!(report.status_code.as_ref().unwrap().results.is_empty());
    assert!(report.is_valid());
}

#[test]
fn invalid_draft4_schema_becomes_a_finding() {
    let mut response = HttpResponse::new().with_body("{}").expecting(
        Expectation::default()
            .with_body_schema(json!({"properties": {"foo": {"type": "integer2"}}})),
    );
    let report = validate(&mut response).unwrap();

    assert_eq!(report.body.expected_type.as_deref(), Some(SCHEMA_JSON));
    assert_eq!(report.body.validator, Some(ValidatorKind::JsonSchema));
    assert_eq!(report.body.results.len(), 1);
    assert_eq!(report.body.results[0].severity, Severity::Error);
    assert!(
        report.body.results[0]
            .message
            .starts_with("JSON schema is not valid draft v4! ")
    );
}

#[test]
fn schema_violations_are_reported() {
    let schema = r#"{"type": "object", "required": ["id"]}"#;
    let mut response = HttpResponse::new()
        .with_header("content-type", "application/json")
        .with_body(r#"{"name": "Ada"}"#)
        .expecting(Expectation::default().with_body_schema(schema));
    let report = validate(&mut response).unwrap();

    assert_eq!(report.body.error_count(), 1);
    assert_eq!(report.body.raw_data.as_ref().unwrap()["length"], 1);
}

#[test]
fn headers_compare_case_insensitively() {
    let mut request = HttpRequest::new()
        .with_method("POST", "/users")
        .with_header("Content-Type", "application/json")
        .with_header("X-Api-Version", "2")
        .with_body("{}")
        .expecting(
            Expectation::default()
                .with_header("CONTENT-TYPE", "application/json")
                .with_header("x-api-version", "2")
                .with_body("{}"),
        );
    let report = validate(&mut request).unwrap();

    let headers = report.headers.as_ref().unwrap();
    assert_eq!(headers.real_type.as_deref(), Some(HTTP_HEADERS_JSON));
    assert_eq!(headers.validator, Some(ValidatorKind::HeadersJsonExample));
    assert!(headers.results.is_empty());
    assert!(report.is_valid());
}

#[test]
fn missing_expected_header_invalidates() {
    let mut response = HttpResponse::new()
        .with_header("content-type", "text/plain")
        .with_body("hello")
        .expecting(
            Expectation::default()
                .with_header("x-trace", "1")
                .with_body("hello"),
        );
    let report = validate(&mut response).unwrap();

    let headers = report.headers.as_ref().unwrap();
    assert_eq!(headers.results.len(), 1);
    assert_eq!(headers.results[0].message, "Header 'x-trace' is missing");
    assert!(report.body.results.is_empty());
    assert!(!report.is_valid());
}

#[test]
fn text_bodies_are_diffed() {
    let mut response = HttpResponse::new()
        .with_body("text\n2\n")
        .expecting(Expectation::default().with_body("text\n1\n"));
    let report = validate(&mut response).unwrap();

    assert_eq!(report.body.real_type.as_deref(), Some(TEXT_PLAIN));
    assert_eq!(report.body.validator, Some(ValidatorKind::TextDiff));
    assert_eq!(report.body.results.len(), 1);
    assert!(report.body.raw_data.as_ref().unwrap().as_str().unwrap().contains("-1"));
}

#[test]
fn json_against_text_has_no_validator() {
    let mut response = HttpResponse::new()
        .with_body(r#"{"a": 1}"#)
        .expecting(Expectation::default().with_body("plain words"));
    let report = validate(&mut response).unwrap();

    assert_eq!(report.body.validator, None);
    assert_eq!(report.body.error_count(), 1);
    assert!(report.body.results[0].message.starts_with("No validator found"));
}

#[test]
fn missing_body_is_fatal() {
    let mut response = HttpResponse::new();
    assert_eq!(validate(&mut response).unwrap_err(), PreconditionError::MissingBody);
}

#[test]
fn fixture_example_validates() {
    let mut message =
        HttpMessage::parse(HttpMessage::example(), gavel_core::FixtureFormat::Toml).unwrap();
    let report = validate(&mut message).unwrap();
    assert!(report.is_valid(), "{}", report.to_terminal());
}

#[test]
fn report_serializes_for_machines() {
    let mut response = HttpResponse::new()
        .with_status_code(200)
        .with_body("")
        .expecting(Expectation::default().with_status_code(201));
    let report = validate(&mut response).unwrap();
    let json = serde_json::to_value(report).unwrap();

    assert_eq!(json["valid"], false);
    assert_eq!(json["statusCode"]["validator"], "StatusCode");
    assert_eq!(json["statusCode"]["results"][0]["severity"], "error");
    assert_eq!(json["body"]["realType"], "text/plain");
    assert!(json["version"]["results"].as_array().unwrap().is_empty());
}
