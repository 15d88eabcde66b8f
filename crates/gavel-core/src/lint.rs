//! JSON parsing with lint-style error messages
//!
//! A parse failure is rendered as the offending token with its 1-based
//! position, the source line, and a caret under the column:
//!
//! ```text
//! Unexpected token '\'' at 1:22
//! {"creative?": false, 'creativ': true }
//!                      ^
//! ```

use serde_json::Value;
use serde_json::error::Category;

/// A JSON syntax error located in its source text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{rendered}")]
pub struct JsonSyntaxError {
    pub line: usize,
    pub column: usize,
    rendered: String,
}

/// Parse `source` as JSON, describing any failure against the source text.
///
/// # Errors
///
/// Returns [`JsonSyntaxError`] if `source` is not a single JSON document.
pub fn parse_json(source: &str) -> Result<Value, JsonSyntaxError> {
    serde_json::from_str(source).map_err(|e| describe(source, &e))
}

fn describe(source: &str, err: &serde_json::Error) -> JsonSyntaxError {
    let line = err.line().max(1);
    let text = source.lines().nth(line - 1).unwrap_or_default();

    // serde_json columns count bytes
    let mut offset = (err.column().max(1) - 1).min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let token = if err.classify() == Category::Eof {
        None
    } else {
        text[offset..].chars().next()
    };
    let caret_pad = text[..offset].chars().count();
    let column = caret_pad + 1;

    let headline = match token {
        Some(c) => format!("Unexpected token '{}' at {line}:{column}", c.escape_default()),
        None => format!("Unexpected end of input at {line}:{column}"),
    };

    JsonSyntaxError {
        line,
        column,
        rendered: format!("{headline}\n{text}\n{}^", " ".repeat(caret_pad)),
    }
}
