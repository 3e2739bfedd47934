//! Diagnostics reported by the comparison and round-trip entry points.

use serde_json::Value;
use thiserror::Error;

use crate::round_trip::Shape;

/// One reported failure from a comparison or round-trip check.
///
/// Every failure mode is a `Diagnostic` returned to the caller; nothing is
/// swallowed and malformed input never panics. The `Display` form is the
/// message a test would print.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Two values at the same location are not equivalent.
    #[error("{location} mismatch. {left} vs. {right}")]
    Mismatch {
        /// Dotted/bracketed path from the document root, empty at the root.
        location: String,
        left: String,
        right: String,
    },
    /// One of the two raw inputs failed to parse; `side` is 1 or 2.
    #[error("error unmarshalling json{side}: {reason}")]
    Parse { side: u8, reason: String },
    /// The round-trip source could not be read.
    #[error("error reading {path}: {reason}")]
    Read { path: String, reason: String },
    /// The round-trip source did not decode into the target container.
    #[error("error decoding json in {path}: {reason}")]
    Decode { path: String, reason: String },
    /// The target container could not be re-encoded to JSON.
    #[error("error encoding {path}: {reason}")]
    Encode { path: String, reason: String },
    /// The target container's JSON root contradicts its declared shape.
    #[error("invalid argument: target declares a JSON {declared} root but encoded as {encoded}")]
    InvalidArgument { declared: Shape, encoded: &'static str },
    /// Summary line prepended when a round-trip check reports failures.
    #[error("*** {count} errors in {path}")]
    Summary { count: usize, path: String },
}

impl Diagnostic {
    pub(crate) fn mismatch(location: &str, left: Option<&Value>, right: Option<&Value>) -> Self {
        Diagnostic::Mismatch {
            location: location.to_string(),
            left: render(left),
            right: render(right),
        }
    }

    /// Location path of a structural mismatch, if this diagnostic is one.
    pub fn location(&self) -> Option<&str> {
        match self {
            Diagnostic::Mismatch { location, .. } => Some(location),
            _ => None,
        }
    }
}

/// Renders one side of a mismatch: strings keep their JSON quoting, other
/// values use their compact JSON form, absent and `null` values render as
/// the literal `nil` marker.
pub(crate) fn render(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "nil".to_string(),
        Some(value) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_strings_quoted() {
        assert_eq!(render(Some(&json!("val"))), "\"val\"");
        assert_eq!(render(Some(&json!(""))), "\"\"");
    }

    #[test]
    fn renders_absent_and_null_as_nil() {
        assert_eq!(render(None), "nil");
        assert_eq!(render(Some(&Value::Null)), "nil");
    }

    #[test]
    fn renders_composites_as_compact_json() {
        assert_eq!(render(Some(&json!([1, 2, 3]))), "[1,2,3]");
        assert_eq!(render(Some(&json!({"a": "val"}))), "{\"a\":\"val\"}");
        assert_eq!(render(Some(&json!(false))), "false");
        assert_eq!(render(Some(&json!(1.5))), "1.5");
    }

    #[test]
    fn file_diagnostics_are_plain_errors_without_a_cause() {
        // Field names must not collide with thiserror's implicit `source`.
        let diagnostics = [
            Diagnostic::Read {
                path: "in.json".to_string(),
                reason: "not found".to_string(),
            },
            Diagnostic::Decode {
                path: "in.json".to_string(),
                reason: "bad type".to_string(),
            },
            Diagnostic::Encode {
                path: "in.json".to_string(),
                reason: "bad value".to_string(),
            },
            Diagnostic::Summary {
                count: 2,
                path: "in.json".to_string(),
            },
        ];
        assert_eq!(diagnostics[0].to_string(), "error reading in.json: not found");
        assert_eq!(diagnostics[3].to_string(), "*** 2 errors in in.json");
        for diagnostic in &diagnostics {
            assert!(std::error::Error::source(diagnostic).is_none());
        }
    }

    #[test]
    fn mismatch_message_shape() {
        let diagnostic = Diagnostic::mismatch("obj.b", Some(&json!("val2")), None);
        assert_eq!(diagnostic.to_string(), "obj.b mismatch. \"val2\" vs. nil");
        assert_eq!(diagnostic.location(), Some("obj.b"));
    }
}
