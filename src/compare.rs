//! Recursive structural equivalence over JSON documents.
//!
//! Two values are equivalent when they are the same type with matching
//! contents, or when one side is absent/`null` and the other holds the
//! empty value for its type: `""`, numeric zero, `false`, `[]`, or an
//! object whose values are all themselves empty. Producers that omit
//! fields and producers that emit explicit nulls therefore compare equal.

use serde_json::{Map, Value};

use crate::diagnostic::Diagnostic;

/// Compares two object-rooted JSON documents and reports every mismatch.
///
/// An empty result means the documents are equivalent. Mismatches carry a
/// dotted/bracketed location path and are emitted in a deterministic order:
/// object keys lexicographically (left side first, then keys present only
/// on the right), array elements by index.
///
/// If either input fails to parse as a JSON object, one [`Diagnostic::Parse`]
/// per failed side is returned and no structural comparison happens.
pub fn compare_objects(json1: &[u8], json2: &[u8]) -> Vec<Diagnostic> {
    let left: Result<Map<String, Value>, _> = serde_json::from_slice(json1);
    let right: Result<Map<String, Value>, _> = serde_json::from_slice(json2);
    let (left, right) = match (left, right) {
        (Ok(left), Ok(right)) => (left, right),
        (left, right) => return parse_failures(left.err(), right.err()),
    };
    let mut out = Vec::new();
    compare_maps("", &left, &right, &mut out);
    out
}

/// Compares two array-rooted JSON documents and reports every mismatch.
///
/// Elements compare pairwise at `[i]` paths rooted at the empty location.
/// A length mismatch yields a single diagnostic at the root showing both
/// full arrays, with no per-element descent.
pub fn compare_arrays(json1: &[u8], json2: &[u8]) -> Vec<Diagnostic> {
    let left: Result<Vec<Value>, _> = serde_json::from_slice(json1);
    let right: Result<Vec<Value>, _> = serde_json::from_slice(json2);
    let (left, right) = match (left, right) {
        (Ok(left), Ok(right)) => (Value::Array(left), Value::Array(right)),
        (left, right) => return parse_failures(left.err(), right.err()),
    };
    let mut out = Vec::new();
    compare_value("", Some(&left), Some(&right), &mut out);
    out
}

/// True if the two object-rooted documents are equivalent.
pub fn equivalent(json1: &[u8], json2: &[u8]) -> bool {
    compare_objects(json1, json2).is_empty()
}

/// True if the two array-rooted documents are equivalent.
pub fn equivalent_arrays(json1: &[u8], json2: &[u8]) -> bool {
    compare_arrays(json1, json2).is_empty()
}

fn parse_failures(
    left: Option<serde_json::Error>,
    right: Option<serde_json::Error>,
) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    if let Some(err) = left {
        out.push(Diagnostic::Parse {
            side: 1,
            reason: err.to_string(),
        });
    }
    if let Some(err) = right {
        out.push(Diagnostic::Parse {
            side: 2,
            reason: err.to_string(),
        });
    }
    out
}

/// Compares one pair of values, dispatching on the left variant. An absent
/// value and an explicit `null` are interchangeable on both sides.
fn compare_value(
    location: &str,
    left: Option<&Value>,
    right: Option<&Value>,
    out: &mut Vec<Diagnostic>,
) {
    let right = right.filter(|value| !value.is_null());
    match left {
        None | Some(Value::Null) => {
            if !is_empty(right) {
                out.push(Diagnostic::mismatch(location, left, right));
            }
        }
        Some(Value::Bool(left_bool)) => {
            let matches = match right {
                Some(Value::Bool(right_bool)) => left_bool == right_bool,
                // false has a nil-equivalence; true does not.
                None => !left_bool,
                Some(_) => false,
            };
            if !matches {
                out.push(Diagnostic::mismatch(location, left, right));
            }
        }
        Some(Value::Number(left_number)) => {
            // Numeric identity, so 1 and 1.0 compare equal.
            let matches = match right {
                Some(Value::Number(right_number)) => {
                    left_number.as_f64() == right_number.as_f64()
                }
                None => left_number.as_f64() == Some(0.0),
                Some(_) => false,
            };
            if !matches {
                out.push(Diagnostic::mismatch(location, left, right));
            }
        }
        Some(Value::String(left_string)) => {
            let matches = match right {
                Some(Value::String(right_string)) => left_string == right_string,
                None => left_string.is_empty(),
                Some(_) => false,
            };
            if !matches {
                out.push(Diagnostic::mismatch(location, left, right));
            }
        }
        Some(Value::Array(items)) => compare_items(location, left, items, right, out),
        Some(Value::Object(fields)) => match right {
            Some(Value::Object(right_fields)) => {
                compare_maps(location, fields, right_fields, out);
            }
            // Descend against an empty object so only non-empty leaves report.
            None => compare_maps(location, fields, &Map::new(), out),
            Some(_) => out.push(Diagnostic::mismatch(location, left, right)),
        },
    }
}

fn compare_maps(
    location: &str,
    left: &Map<String, Value>,
    right: &Map<String, Value>,
    out: &mut Vec<Diagnostic>,
) {
    for key in sorted_keys(left) {
        compare_value(&child(location, key), left.get(key), right.get(key), out);
    }
    for key in sorted_keys(right) {
        // Keys present on both sides were covered by the first pass.
        if !left.contains_key(key) {
            compare_value(&child(location, key), None, right.get(key), out);
        }
    }
}

/// `right` has already been null-filtered by the caller; absent and `null`
/// both count as a zero-length array.
fn compare_items(
    location: &str,
    left: Option<&Value>,
    items: &[Value],
    right: Option<&Value>,
    out: &mut Vec<Diagnostic>,
) {
    let right_items: &[Value] = match right {
        None => &[],
        Some(Value::Array(right_items)) => right_items,
        Some(_) => {
            out.push(Diagnostic::mismatch(location, left, right));
            return;
        }
    };
    if items.len() != right_items.len() {
        out.push(Diagnostic::mismatch(location, left, right));
        return;
    }
    for (index, item) in items.iter().enumerate() {
        compare_value(
            &format!("{location}[{index}]"),
            Some(item),
            right_items.get(index),
            out,
        );
    }
}

/// True if the value is absent or holds the empty value for its type. An
/// object is empty iff all of its values are recursively empty; an array is
/// empty iff it has no elements.
fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(boolean)) => !boolean,
        Some(Value::Number(number)) => number.as_f64() == Some(0.0),
        Some(Value::String(string)) => string.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(fields)) => fields.values().all(|value| is_empty(Some(value))),
    }
}

/// Keys in lexicographic order, independent of the map's own iteration
/// order, so diagnostic output is reproducible.
fn sorted_keys(map: &Map<String, Value>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

fn child(location: &str, key: &str) -> String {
    if location.is_empty() {
        key.to_string()
    } else {
        format!("{location}.{key}")
    }
}
