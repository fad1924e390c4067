//! Entities extracted from raw input.

use serde::{Deserialize, Serialize};

/// Entities found in the original text.
///
/// Each category is omitted from the serialized map when nothing was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    numbers: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dates: Option<Vec<String>>,
}

fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
    if values.is_empty() { None } else { Some(values) }
}

impl Entities {
    /// Creates an entity set; empty categories are treated as absent.
    #[must_use]
    pub fn new(numbers: Vec<u64>, names: Vec<String>, dates: Vec<String>) -> Self {
        Self {
            numbers: non_empty(numbers),
            names: non_empty(names),
            dates: non_empty(dates),
        }
    }

    /// Returns extracted integer literals.
    #[must_use]
    pub fn numbers(&self) -> &[u64] {
        self.numbers.as_deref().unwrap_or_default()
    }

    /// Returns capitalized-word runs.
    #[must_use]
    pub fn names(&self) -> &[String] {
        self.names.as_deref().unwrap_or_default()
    }

    /// Returns date-like substrings.
    #[must_use]
    pub fn dates(&self) -> &[String] {
        self.dates.as_deref().unwrap_or_default()
    }

    /// Returns the keys of the categories that are present.
    #[must_use]
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.numbers.is_some() {
            keys.push("numbers");
        }
        if self.names.is_some() {
            keys.push("names");
        }
        if self.dates.is_some() {
            keys.push("dates");
        }
        keys
    }

    /// Returns `true` when no category is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.numbers.is_none() && self.names.is_none() && self.dates.is_none()
    }
}
