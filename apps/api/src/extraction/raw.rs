//! Typed access into the untyped AI output tree.
//!
//! The AI answer is a `serde_json::Value` whose shape is only loosely
//! guaranteed. Mappers never index into it directly; they go through these
//! coercions, which treat wrong-typed and blank values as absent.

use serde_json::{Map, Value};

/// Decoded output of one AI call, before normalization.
#[derive(Debug, Clone)]
pub struct RawExtraction<'a> {
    value: &'a Value,
}

impl<'a> RawExtraction<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Non-blank text at `key`. Numbers are rendered as text.
    pub fn text(&self, key: &str) -> Option<String> {
        self.value.get(key).and_then(as_text)
    }

    /// Text at the first of `keys` holding one.
    pub fn first_text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|k| self.text(k))
    }

    /// Nested object at `key`, if it is one.
    pub fn object(&self, key: &str) -> Option<RawExtraction<'a>> {
        self.value
            .get(key)
            .filter(|v| v.is_object())
            .map(RawExtraction::new)
    }

    /// Array at `key`. Missing or non-array values yield an empty list.
    pub fn items(&self, key: &str) -> Vec<RawExtraction<'a>> {
        self.value
            .get(key)
            .and_then(Value::as_array)
            .map(|arr| arr.iter().map(RawExtraction::new).collect())
            .unwrap_or_default()
    }

    /// List of non-blank strings at `key`. A comma-separated string is split.
    pub fn text_list(&self, key: &str) -> Vec<String> {
        match self.value.get(key) {
            Some(Value::Array(arr)) => arr.iter().filter_map(as_text).collect(),
            Some(Value::String(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Boolean at `key`. Accepts JSON booleans and "true"/"false"/"yes"/"no".
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.value.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" | "y" => Some(true),
                "false" | "no" | "n" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Every string-valued property of this object, in document order.
    pub fn string_properties(&self) -> Vec<&'a str> {
        self.value
            .as_object()
            .map(Map::values)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .collect()
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
