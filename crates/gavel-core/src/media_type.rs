//! Media types used to classify message components

/// Type given to any header key/value mapping
pub const HTTP_HEADERS_JSON: &str = "application/vnd.apiary.http-headers+json";
pub const JSON: &str = "application/json";
pub const SCHEMA_JSON: &str = "application/schema+json";
pub const TEXT_PLAIN: &str = "text/plain";
/// Type given to both sides of the status code component
pub const STATUS_CODE: &str = "text/vnd.apiary.status-code";

/// Media type without parameters: `"application/json; charset=utf-8"` → `"application/json"`
#[must_use]
pub fn essence(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or("").trim()
}

/// Whether a content type belongs to the JSON family:
/// `application/json` or any `+json` structured suffix.
#[must_use]
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return false;
    };
    let media = essence(content_type).to_ascii_lowercase();
    media == JSON || media.ends_with("+json")
}
