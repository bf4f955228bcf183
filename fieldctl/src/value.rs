//! Values carried through the filter and validator pipelines.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The value of an input.
///
/// Scalar inputs (text, single choice) carry `Text`; multi-valued inputs carry
/// the ordered list of selected values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    List(Vec<String>),
}

impl Value {
    /// An empty scalar value.
    pub fn empty() -> Self {
        Value::Text(String::new())
    }

    /// Check whether the value is blank.
    ///
    /// Text is blank when it is empty or whitespace only; a list is blank when
    /// it has no entries.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Text(text) => text.trim().is_empty(),
            Value::List(items) => items.is_empty(),
        }
    }

    /// Get the text of a scalar value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::List(_) => None,
        }
    }

    /// Get the entries of a list value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::Text(_) => None,
            Value::List(items) => Some(items),
        }
    }

    /// Apply `f` to the text, or to every entry of a list.
    pub fn map_text<F>(self, f: F) -> Self
    where
        F: Fn(String) -> String,
    {
        match self {
            Value::Text(text) => Value::Text(f(text)),
            Value::List(items) => Value::List(items.into_iter().map(f).collect()),
        }
    }

    /// Number of characters of a scalar value, or number of entries of a list.
    pub fn len(&self) -> usize {
        match self {
            Value::Text(text) => text.chars().count(),
            Value::List(items) => items.len(),
        }
    }

    /// Check if the value has no characters / no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::empty()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::List(items.into_iter().map(String::from).collect())
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Value::Text(text) if text == other)
    }
}
