//! json-equiv — semantic equivalence checks for JSON documents.
//!
//! Two documents are equivalent when they are structurally identical under
//! the nil-equivalence rule: an absent or `null` value matches the empty
//! value of its counterpart's type (`""`, `0`, `false`, `[]`, or an object
//! whose values are all themselves empty). This makes it practical to
//! assert that a typed data model losslessly captures JSON produced by
//! sources that omit fields or emit explicit nulls.
//!
//! [`compare_objects`] and [`compare_arrays`] report every mismatch between
//! two raw documents as an ordered list of [`Diagnostic`] values;
//! [`check_round_trip`] decodes a document into a typed container,
//! re-encodes it, and reports what the container failed to capture.
//!
//! # Examples
//!
//! ```
//! use json_equiv::compare_objects;
//!
//! // Empty values are equivalent to absent ones.
//! assert!(compare_objects(br#"{"name": ""}"#, b"{}").is_empty());
//!
//! // Everything else mismatches, at a deterministic path.
//! let diagnostics = compare_objects(br#"{"name": "a"}"#, b"{}");
//! assert_eq!(diagnostics[0].to_string(), r#"name mismatch. "a" vs. nil"#);
//! ```

mod compare;
mod diagnostic;
mod round_trip;

pub use compare::{compare_arrays, compare_objects, equivalent, equivalent_arrays};
pub use diagnostic::Diagnostic;
pub use round_trip::{check_round_trip, JsonContainer, Shape};

use std::path::Path;

/// Panics with the full diagnostic list if the two object-rooted documents
/// are not equivalent.
#[track_caller]
pub fn assert_equivalent(json1: &[u8], json2: &[u8]) {
    fail_on(compare_objects(json1, json2));
}

/// Panics with the full diagnostic list if the two array-rooted documents
/// are not equivalent.
#[track_caller]
pub fn assert_arrays_equivalent(json1: &[u8], json2: &[u8]) {
    fail_on(compare_arrays(json1, json2));
}

/// Panics with the full diagnostic list if the round-trip check reports
/// any failure. See [`check_round_trip`].
#[track_caller]
pub fn assert_round_trip<T: JsonContainer>(path: impl AsRef<Path>, target: &mut T) {
    fail_on(check_round_trip(path, target));
}

#[track_caller]
fn fail_on(diagnostics: Vec<Diagnostic>) {
    if diagnostics.is_empty() {
        return;
    }
    let report: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
    panic!("{}", report.join("\n"));
}
