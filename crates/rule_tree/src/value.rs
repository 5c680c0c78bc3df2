use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell of the training table.
///
/// Text values are stored lowercased; booleans keep their own variant so
/// that boolean columns can be branched on `{true, false}` directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Text(String),
}

impl AttributeValue {
    pub fn text(raw: &str) -> Self {
        AttributeValue::Text(normalize(raw))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, AttributeValue::Bool(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            AttributeValue::Text(_) => None,
        }
    }

    /// Case-insensitive comparison against user input.
    pub fn matches_input(&self, raw: &str) -> bool {
        let raw = normalize(raw);
        match self {
            AttributeValue::Bool(b) => match raw.as_str() {
                "true" | "1" => *b,
                "false" | "0" => !*b,
                _ => false,
            },
            AttributeValue::Text(s) => *s == raw,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::text(value)
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::text(&value)
    }
}

pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
