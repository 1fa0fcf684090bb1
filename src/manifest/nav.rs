//! Safe navigation over parsed YAML documents.
//!
//! Every accessor defaults on missing or mistyped fields instead of
//! erroring, so rubric predicates can probe arbitrarily deep paths and
//! simply fail their own check when the data is not there.

use serde_yaml::{Mapping, Value};

/// Walk a key path through nested mappings. Any miss returns `None`.
pub fn at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = root;
    for key in path {
        current = current.as_mapping()?.get(*key)?;
    }
    Some(current)
}

/// Integer at `path`, or `default` when absent or not a number.
pub fn int_or(root: &Value, path: &[&str], default: i64) -> i64 {
    at(root, path).and_then(Value::as_i64).unwrap_or(default)
}

/// String slice at `path`, when present and actually a string.
pub fn str_at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    at(root, path).and_then(Value::as_str)
}

/// Mapping at `path`, when present and actually a mapping.
pub fn mapping_at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Mapping> {
    at(root, path).and_then(Value::as_mapping)
}

/// Sequence items at `path`; absent or mistyped reads as empty.
pub fn items_at<'a>(root: &'a Value, path: &[&str]) -> &'a [Value] {
    at(root, path)
        .and_then(Value::as_sequence)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Python-style truthiness: null, false, zero, empty string, empty
/// mapping, and empty sequence are all falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

/// Truthiness of the value at `path`; absent is falsy.
pub fn truthy_at(root: &Value, path: &[&str]) -> bool {
    at(root, path).map(is_truthy).unwrap_or(false)
}

/// Render a scalar for check details. Strings print bare, everything
/// else prints in its YAML spelling (`null`, `true`, `8080`, ...).
pub fn display_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(_) => "[...]".to_string(),
        Value::Mapping(map) => display_mapping(map),
        Value::Tagged(tagged) => display_scalar(&tagged.value),
    }
}

/// Scalar rendering for the value at `path`; absent renders as `null`.
pub fn display_at(root: &Value, path: &[&str]) -> String {
    at(root, path)
        .map(display_scalar)
        .unwrap_or_else(|| "null".to_string())
}

/// Compact one-line rendering of a mapping, in document order.
pub fn display_mapping(map: &Mapping) -> String {
    let entries: Vec<String> = map
        .iter()
        .map(|(k, v)| format!("{}: {}", display_scalar(k), display_scalar(v)))
        .collect();
    format!("{{{}}}", entries.join(", "))
}
