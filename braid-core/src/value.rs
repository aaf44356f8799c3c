//! Dynamic value type for component inputs, outputs, and predicates.
//!
//! Components exchange data as keyed maps of [`Value`]. The condition
//! helpers (`field_equals`, `field_is_true`, ...) let exit predicates be
//! written declaratively over a component's output fields.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// A keyword-argument mapping passed to and returned from component runs.
pub type ValueMap = HashMap<String, Value>;

/// Dynamic value for field access and condition evaluation.
///
/// Wraps `serde_json::Value` to provide type-safe field extraction and the
/// comparison operations used by exit predicates and carry functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Value(pub JsonValue);

impl Value {
    /// Create a null value.
    pub fn null() -> Self {
        Self(JsonValue::Null)
    }

    /// Create a boolean value.
    pub fn bool(v: bool) -> Self {
        Self(JsonValue::Bool(v))
    }

    /// Create an integer value.
    pub fn int(v: i64) -> Self {
        Self(JsonValue::Number(v.into()))
    }

    /// Create a floating-point value.
    pub fn float(v: f64) -> Self {
        Self(serde_json::Number::from_f64(v).map_or(JsonValue::Null, JsonValue::Number))
    }

    /// Create a string value.
    pub fn string(v: impl Into<String>) -> Self {
        Self(JsonValue::String(v.into()))
    }

    /// Check if the value is null.
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// Get a field by path (dot notation, optional `$.` prefix, `[idx]`
    /// array access). Returns None if the field doesn't exist.
    pub fn get_field(&self, path: &str) -> Option<Value> {
        let path = path.strip_prefix("$.").unwrap_or(path);

        let mut current = &self.0;
        for part in path.split('.') {
            if let Some((field, idx_str)) = part.split_once('[') {
                current = current.get(field)?;
                let idx: usize = idx_str.strip_suffix(']')?.parse().ok()?;
                current = current.get(idx)?;
            } else {
                current = current.get(part)?;
            }
        }
        Some(Value(current.clone()))
    }

    /// Get a field as a string.
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get_field(path).and_then(|v| v.as_string())
    }

    /// Get a field as an f64.
    pub fn get_f64(&self, path: &str) -> Option<f64> {
        self.get_field(path).and_then(|v| v.as_f64())
    }

    /// Get a field as a bool.
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get_field(path).and_then(|v| v.as_bool())
    }

    /// Convert to string if possible.
    pub fn as_string(&self) -> Option<String> {
        match &self.0 {
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            JsonValue::Bool(b) => Some(b.to_string()),
            JsonValue::Null => None,
            _ => Some(self.0.to_string()),
        }
    }

    /// Convert to f64 if possible.
    pub fn as_f64(&self) -> Option<f64> {
        match &self.0 {
            JsonValue::Number(n) => n.as_f64(),
            JsonValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Convert to bool if possible.
    pub fn as_bool(&self) -> Option<bool> {
        match &self.0 {
            JsonValue::Bool(b) => Some(*b),
            JsonValue::String(s) => match s.to_lowercase().as_str() {
                "true" | "1" | "yes" => Some(true),
                "false" | "0" | "no" => Some(false),
                _ => None,
            },
            JsonValue::Number(n) => Some(n.as_f64().is_some_and(|v| v != 0.0)),
            JsonValue::Null => Some(false),
            _ => None,
        }
    }

    /// Check equality with a string value.
    pub fn equals_str(&self, other: &str) -> bool {
        self.as_string().is_some_and(|s| s == other)
    }

    /// Check if a field equals a value (string comparison).
    pub fn field_equals(&self, path: &str, value: &str) -> bool {
        self.get_field(path).is_some_and(|v| v.equals_str(value))
    }

    /// Check if a field is greater than a threshold.
    pub fn field_greater_than(&self, path: &str, threshold: f64) -> bool {
        self.get_f64(path).is_some_and(|v| v > threshold)
    }

    /// Check if a field is less than a threshold.
    pub fn field_less_than(&self, path: &str, threshold: f64) -> bool {
        self.get_f64(path).is_some_and(|v| v < threshold)
    }

    /// Check if a boolean field is true.
    pub fn field_is_true(&self, path: &str) -> bool {
        self.get_bool(path).unwrap_or(false)
    }

    /// Check if a boolean field is false.
    pub fn field_is_false(&self, path: &str) -> bool {
        self.get_bool(path).is_some_and(|b| !b)
    }

    /// Access the inner serde_json::Value.
    pub fn inner(&self) -> &JsonValue {
        &self.0
    }

    /// Convert into the inner serde_json::Value.
    pub fn into_inner(self) -> JsonValue {
        self.0
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::null()
    }
}

impl From<JsonValue> for Value {
    fn from(v: JsonValue) -> Self {
        Self(v)
    }
}

impl From<Value> for JsonValue {
    fn from(v: Value) -> Self {
        v.0
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::string(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::bool(v)
    }
}
