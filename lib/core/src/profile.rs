//! Loosely-typed user profiles
//!
//! Profiles arrive as arbitrary JSON objects. Only the keys the category
//! mapper and the filter compiler inspect carry meaning; everything else is
//! ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Profile {
    fields: Map<String, Value>,
}

impl Profile {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a profile from any JSON value; non-objects yield an empty profile
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// JSON truthiness of a field; absent keys are false
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).map(is_truthy).unwrap_or(false)
    }

    /// String value of a field, if it is a string
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Whether the field is a string equal to one of `options`
    pub fn text_in(&self, key: &str, options: &[&str]) -> bool {
        self.text(key).map(|v| options.contains(&v)).unwrap_or(false)
    }
}

impl From<Map<String, Value>> for Profile {
    fn from(fields: Map<String, Value>) -> Self {
        Profile::new(fields)
    }
}

/// `false`, `null`, zero, and empty strings/arrays/objects are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
