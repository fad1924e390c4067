//! Analyzed input snapshot passed to selection and dispatch.

use super::{Entities, Intent, Sentiment};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the raw text reached the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Typed text.
    #[default]
    Text,
    /// Text transcribed from speech.
    Speech,
}

impl InputKind {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Speech => "speech",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned while parsing an input kind label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown input kind: {0}")]
pub struct ParseInputKindError(pub String);

impl FromStr for InputKind {
    type Err = ParseInputKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "speech" => Ok(Self::Speech),
            _ => Err(ParseInputKindError(value.to_owned())),
        }
    }
}

/// Immutable analysis of one user request.
///
/// This is the JSON body sent to every backend. Missing fields deserialize to
/// their defaults so partial payloads round-trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzedInput {
    original_input: String,
    cleaned_input: String,
    tokens: Vec<String>,
    intent: Intent,
    entities: Entities,
    sentiment: Sentiment,
    input_type: InputKind,
}

impl AnalyzedInput {
    /// Assembles an analysis record.
    #[must_use]
    pub const fn new(
        original_input: String,
        cleaned_input: String,
        tokens: Vec<String>,
        intent: Intent,
        entities: Entities,
        sentiment: Sentiment,
        input_type: InputKind,
    ) -> Self {
        Self {
            original_input,
            cleaned_input,
            tokens,
            intent,
            entities,
            sentiment,
            input_type,
        }
    }

    /// Returns the raw text as received.
    #[must_use]
    pub fn original_input(&self) -> &str {
        &self.original_input
    }

    /// Returns the lowercased, punctuation-free text.
    #[must_use]
    pub fn cleaned_input(&self) -> &str {
        &self.cleaned_input
    }

    /// Returns the whitespace tokens of the cleaned text.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns the classified intent.
    #[must_use]
    pub const fn intent(&self) -> Intent {
        self.intent
    }

    /// Returns the extracted entities.
    #[must_use]
    pub const fn entities(&self) -> &Entities {
        &self.entities
    }

    /// Returns the sentiment reading.
    #[must_use]
    pub const fn sentiment(&self) -> &Sentiment {
        &self.sentiment
    }

    /// Returns how the text reached the system.
    #[must_use]
    pub const fn input_type(&self) -> InputKind {
        self.input_type
    }

    /// Returns the keywords used for backend scoring: the lowercased cleaned
    /// tokens, the intent label, and the present entity keys.
    #[must_use]
    pub fn selection_keywords(&self) -> Vec<String> {
        let mut keywords: Vec<String> = self
            .cleaned_input
            .to_lowercase()
            .split_whitespace()
            .map(str::to_owned)
            .collect();
        keywords.push(self.intent.as_str().to_owned());
        keywords.extend(self.entities.keys().into_iter().map(str::to_owned));
        keywords
    }
}
