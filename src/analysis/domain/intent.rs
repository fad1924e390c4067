//! Coarse intent classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse intent derived from keyword matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Looking something up.
    Search,
    /// Making something new.
    Create,
    /// Removing something.
    Delete,
    /// Changing something that exists.
    Update,
    /// Asking for assistance.
    Help,
    /// Asking for details.
    Info,
    /// No keyword matched.
    #[default]
    Unknown,
}

/// Intent keyword sets in classification priority order.
const INTENT_KEYWORDS: [(Intent, &[&str]); 6] = [
    (
        Intent::Search,
        &["find", "search", "look", "query", "where", "what"],
    ),
    (Intent::Create, &["create", "make", "add", "new", "generate"]),
    (
        Intent::Delete,
        &["delete", "remove", "erase", "destroy", "eliminate"],
    ),
    (
        Intent::Update,
        &["update", "change", "modify", "edit", "alter"],
    ),
    (Intent::Help, &["help", "assist", "support", "guide", "explain"]),
    (
        Intent::Info,
        &["information", "details", "tell", "about", "describe"],
    ),
];

impl Intent {
    /// Classifies a token sequence.
    ///
    /// Returns the first intent, in priority order, whose keyword set
    /// intersects the tokens; [`Intent::Unknown`] when none does.
    #[must_use]
    pub fn classify<S: AsRef<str>>(tokens: &[S]) -> Self {
        INTENT_KEYWORDS
            .iter()
            .find(|(_, keywords)| {
                tokens
                    .iter()
                    .any(|token| keywords.contains(&token.as_ref()))
            })
            .map_or(Self::Unknown, |(intent, _)| *intent)
    }

    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Create => "create",
            Self::Delete => "delete",
            Self::Update => "update",
            Self::Help => "help",
            Self::Info => "info",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
