use serde::{Deserialize, Serialize};
use std::fmt;

/// The value of a variant, either a boolean toggle or one of an enumerated set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantValue {
    Bool(bool),
    Str(String),
}

impl VariantValue {
    /// Interprets a textual value, turning `true` and `false` into booleans.
    pub fn from_text(text: &str) -> Self {
        match text {
            "true" => VariantValue::Bool(true),
            "false" => VariantValue::Bool(false),
            other => VariantValue::Str(other.to_string()),
        }
    }

    /// Converts a JSON scalar into a variant value.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(VariantValue::Bool(*b)),
            serde_json::Value::String(s) => Some(VariantValue::Str(s.clone())),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            VariantValue::Bool(b) => Some(*b),
            VariantValue::Str(_) => None,
        }
    }
}

impl From<bool> for VariantValue {
    fn from(value: bool) -> Self {
        VariantValue::Bool(value)
    }
}

impl From<&str> for VariantValue {
    fn from(value: &str) -> Self {
        VariantValue::Str(value.to_string())
    }
}

impl fmt::Display for VariantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantValue::Bool(b) => write!(f, "{}", b),
            VariantValue::Str(s) => write!(f, "{}", s),
        }
    }
}
