//! Training examples for the keyword model.

use crate::analysis::domain::Intent;
use crate::backend::domain::BackendId;
use serde::{Deserialize, Serialize};

/// One labelled request: the text, its intent and entities, and the backend
/// that should have handled it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    #[serde(rename = "selected_ai")]
    selected_backend: BackendId,
    input: String,
    intent: Intent,
    #[serde(default)]
    entities: Vec<String>,
}

impl TrainingExample {
    /// Creates a training example.
    #[must_use]
    pub fn new(
        selected_backend: BackendId,
        input: impl Into<String>,
        intent: Intent,
        entities: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            selected_backend,
            input: input.into(),
            intent,
            entities: entities.into_iter().collect(),
        }
    }

    /// Returns the backend this example is labelled with.
    #[must_use]
    pub const fn selected_backend(&self) -> BackendId {
        self.selected_backend
    }

    /// Returns the keywords this example contributes: the lowercased
    /// whitespace-split input, the intent label, and the entity list.
    #[must_use]
    pub fn keywords(&self) -> Vec<String> {
        let mut keywords: Vec<String> = self
            .input
            .to_lowercase()
            .split_whitespace()
            .map(str::to_owned)
            .collect();
        keywords.push(self.intent.as_str().to_owned());
        keywords.extend(self.entities.iter().cloned());
        keywords
    }
}
