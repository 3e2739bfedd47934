//! Decode/re-encode round-trip checking for typed JSON containers.
//!
//! A round-trip check validates that a typed container captures a JSON
//! document losslessly: the document is decoded into the container,
//! re-encoded, and the re-encoded document is compared against the original
//! under the nil-equivalence rule. Fields the container does not model, or
//! models with the wrong type, surface as mismatch diagnostics.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::compare::{compare_arrays, compare_objects};
use crate::diagnostic::Diagnostic;

/// Root shape a container declares for its JSON encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Object,
    Array,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::Object => "object",
            Shape::Array => "array",
        })
    }
}

/// A typed container that can stand in for a JSON document in a round-trip
/// check: decodable from JSON, encodable back to JSON, and tagged with the
/// root shape it encodes to. Scalar containers are not round-trippable and
/// have no place to implement this.
///
/// Implementations are provided for vectors (array-rooted) and the common
/// string-keyed map types (object-rooted). Structs opt in with a one-line
/// impl:
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use json_equiv::{JsonContainer, Shape};
///
/// #[derive(Serialize, Deserialize)]
/// struct Payload {
///     name: Option<String>,
/// }
///
/// impl JsonContainer for Payload {
///     const SHAPE: Shape = Shape::Object;
/// }
/// ```
pub trait JsonContainer: Serialize + DeserializeOwned {
    const SHAPE: Shape;
}

impl<T: Serialize + DeserializeOwned> JsonContainer for Vec<T> {
    const SHAPE: Shape = Shape::Array;
}

impl JsonContainer for Map<String, Value> {
    const SHAPE: Shape = Shape::Object;
}

impl<V: Serialize + DeserializeOwned> JsonContainer for BTreeMap<String, V> {
    const SHAPE: Shape = Shape::Object;
}

impl<V: Serialize + DeserializeOwned> JsonContainer for HashMap<String, V> {
    const SHAPE: Shape = Shape::Object;
}

/// Reads the JSON document at `path`, decodes it into `target`, re-encodes
/// `target`, and compares the re-encoded document against the original.
///
/// An empty result means the container captured the document losslessly
/// under the nil-equivalence rule. Otherwise the mismatches are preceded by
/// a [`Diagnostic::Summary`] naming the source and the mismatch count.
/// Read, decode, and encode failures abort the check with one diagnostic
/// and no comparison; `target` keeps the decoded document on success.
pub fn check_round_trip<T: JsonContainer>(
    path: impl AsRef<Path>,
    target: &mut T,
) -> Vec<Diagnostic> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let original = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            return vec![Diagnostic::Read {
                path: display,
                reason: err.to_string(),
            }]
        }
    };
    *target = match serde_json::from_slice(&original) {
        Ok(decoded) => decoded,
        Err(err) => {
            return vec![Diagnostic::Decode {
                path: display,
                reason: err.to_string(),
            }]
        }
    };
    let encoded = match serde_json::to_value(&*target) {
        Ok(value) => value,
        Err(err) => {
            return vec![Diagnostic::Encode {
                path: display,
                reason: err.to_string(),
            }]
        }
    };
    // A container whose serialization contradicts its declared shape (for
    // example a transparent newtype over a scalar) cannot be compared.
    if shape_of(&encoded) != Some(T::SHAPE) {
        return vec![Diagnostic::InvalidArgument {
            declared: T::SHAPE,
            encoded: json_type(&encoded),
        }];
    }

    let reencoded = encoded.to_string();
    let mut out = match T::SHAPE {
        Shape::Object => compare_objects(&original, reencoded.as_bytes()),
        Shape::Array => compare_arrays(&original, reencoded.as_bytes()),
    };
    if !out.is_empty() {
        let count = out.len();
        out.insert(0, Diagnostic::Summary { count, path: display });
    }
    out
}

fn shape_of(value: &Value) -> Option<Shape> {
    match value {
        Value::Object(_) => Some(Shape::Object),
        Value::Array(_) => Some(Shape::Array),
        _ => None,
    }
}

/// JSON type name used in shape diagnostics.
fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn shape_names() {
        assert_eq!(Shape::Object.to_string(), "object");
        assert_eq!(Shape::Array.to_string(), "array");
    }

    #[test]
    fn shape_of_roots() {
        assert_eq!(shape_of(&json!({})), Some(Shape::Object));
        assert_eq!(shape_of(&json!([])), Some(Shape::Array));
        assert_eq!(shape_of(&json!("scalar")), None);
        assert_eq!(shape_of(&json!(null)), None);
    }

    #[test]
    fn json_type_names() {
        assert_eq!(json_type(&json!(null)), "null");
        assert_eq!(json_type(&json!(true)), "boolean");
        assert_eq!(json_type(&json!(1)), "number");
        assert_eq!(json_type(&json!("s")), "string");
        assert_eq!(json_type(&json!([])), "array");
        assert_eq!(json_type(&json!({})), "object");
    }
}
