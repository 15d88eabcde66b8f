//! Structural JSON comparison against an example document
//!
//! The example describes shape, not content: keys of expected objects must
//! exist, value kinds must agree, primitive values are not compared. Extra
//! real keys are allowed. Arrays are compared item by item up to the
//! example's length.

use serde_json::Value;

use gavel_core::decode::json_kind;
use gavel_core::lint::parse_json;
use gavel_core::{ComparatorError, ComparatorResult};

use crate::mismatch::{Mismatch, display_pointer, into_comparison, pointer_join};

/// Compare a real JSON body against an expected JSON example
///
/// # Errors
///
/// Returns [`ComparatorError::Unparseable`] if either side is not JSON.
pub fn compare_json_example(real: &str, expected: &str) -> ComparatorResult {
    let real = parse_json(real).map_err(|e| {
        ComparatorError::Unparseable(format!("Real body is not a parseable JSON:\n{e}"))
    })?;
    let expected = parse_json(expected).map_err(|e| {
        ComparatorError::Unparseable(format!("Expected body is not a parseable JSON:\n{e}"))
    })?;

    let mut mismatches = Vec::new();
    walk(&real, &expected, "", &mut mismatches);
    Ok(into_comparison(mismatches))
}

fn walk(real: &Value, expected: &Value, pointer: &str, out: &mut Vec<Mismatch>) {
    let (real_kind, expected_kind) = (json_kind(real), json_kind(expected));
    if real_kind != expected_kind {
        out.push(Mismatch::at(
            pointer,
            format!(
                "At '{}' expected {expected_kind} but got {real_kind}",
                display_pointer(pointer)
            ),
        ));
        return;
    }

    match (real, expected) {
        (Value::Object(real), Value::Object(expected)) => {
            for (key, expected_value) in expected {
                let child = pointer_join(pointer, key);
                match real.get(key) {
                    Some(real_value) => walk(real_value, expected_value, &child, out),
                    None => out.push(Mismatch::at(
                        child,
                        format!(
                            "Missing required property '{key}' at '{}'",
                            display_pointer(pointer)
                        ),
                    )),
                }
            }
        }
        (Value::Array(real), Value::Array(expected)) => {
            for (index, expected_item) in expected.iter().enumerate() {
                let child = format!("{pointer}/{index}");
                match real.get(index) {
                    Some(real_item) => walk(real_item, expected_item, &child, out),
                    None => out.push(Mismatch::at(
                        child.as_str(),
                        format!("Missing array item at '{child}'"),
                    )),
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(real: &str, expected: &str) -> Vec<String> {
        compare_json_example(real, expected)
            .unwrap()
            .findings
            .into_iter()
            .map(|f| f.message)
            .collect()
    }

    #[test]
    fn same_shape_different_values_match() {
        assert!(messages(r#"{"id": 7, "name": "Ada"}"#, r#"{"id": 0, "name": ""}"#).is_empty());
    }

    #[test]
    fn extra_real_keys_are_fine() {
        assert!(messages(r#"{"a": 1, "b": 2}"#, r#"{"a": 0}"#).is_empty());
    }

    #[test]
    fn missing_key_is_reported() {
        assert_eq!(
            messages(r#"{"a": "b"}"#, r#"{"b": "c"}"#),
            vec!["Missing required property 'b' at '/'"]
        );
    }

    #[test]
    fn nested_missing_key_has_pointer() {
        let comparison =
            compare_json_example(r#"{"user": {}}"#, r#"{"user": {"email": ""}}"#).unwrap();
        assert_eq!(comparison.raw_data.unwrap()["errors"][0]["property"], "/user/email");
    }

    #[test]
    fn kind_mismatch_is_reported() {
        assert_eq!(
            messages(r#"{"id": "7"}"#, r#"{"id": 7}"#),
            vec!["At '/id' expected Number but got String"]
        );
    }

    #[test]
    fn arrays_compare_positionally() {
        assert!(messages("[1, 2, 3]", "[0]").is_empty());
        assert_eq!(messages("[]", "[0]"), vec!["Missing array item at '/0'"]);
        assert_eq!(
            messages(r#"[{"a": 1}]"#, r#"[{"a": 1, "b": 2}]"#),
            vec!["Missing required property 'b' at '/0'"]
        );
    }

    #[test]
    fn unparseable_side_is_an_error() {
        let err = compare_json_example("{", "{}").unwrap_err();
        assert!(err.to_string().starts_with("Real body is not a parseable JSON:"));
        let err = compare_json_example("{}", "nope").unwrap_err();
        assert!(err.to_string().starts_with("Expected body is not a parseable JSON:"));
    }
}
