//! Per-backend keyword frequency model.

use super::{Selection, TrainingExample};
use crate::backend::domain::BackendId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Keyword counts learned per backend.
///
/// Serializes as `{"<backend id>": {"<keyword>": <count>}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordModel {
    backends: BTreeMap<BackendId, BTreeMap<String, u64>>,
}

impl KeywordModel {
    /// Creates an untrained model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every example's keywords to its backend's counts.
    pub fn train<'a>(&mut self, examples: impl IntoIterator<Item = &'a TrainingExample>) {
        for example in examples {
            let counts = self
                .backends
                .entry(example.selected_backend())
                .or_default();
            for keyword in example.keywords() {
                *counts.entry(keyword).or_insert(0) += 1;
            }
        }
    }

    /// Returns the learned count for one keyword, `0` when unseen.
    #[must_use]
    pub fn count(&self, backend_id: BackendId, keyword: &str) -> u64 {
        self.backends
            .get(&backend_id)
            .and_then(|counts| counts.get(keyword))
            .copied()
            .unwrap_or(0)
    }

    /// Sums the learned counts of `keywords` for a backend.
    ///
    /// Untrained backends always score `0`. Repeated keywords count once per
    /// occurrence.
    #[must_use]
    pub fn score<S: AsRef<str>>(&self, backend_id: BackendId, keywords: &[S]) -> u64 {
        let Some(counts) = self.backends.get(&backend_id) else {
            return 0;
        };
        keywords
            .iter()
            .filter_map(|keyword| counts.get(keyword.as_ref()))
            .fold(0_u64, |total, count| total.saturating_add(*count))
    }

    /// Picks the highest-scoring candidate.
    ///
    /// Ties go to the candidate encountered first. An empty candidate list
    /// yields [`Selection::NoBackendAvailable`] without scoring.
    #[must_use]
    pub fn select<S: AsRef<str>>(
        &self,
        keywords: &[S],
        candidates: impl IntoIterator<Item = BackendId>,
    ) -> Selection {
        let mut best: Option<(BackendId, u64)> = None;
        for candidate in candidates {
            let score = self.score(candidate, keywords);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((candidate, score)),
            }
        }
        best.map_or(Selection::NoBackendAvailable, |(id, _)| {
            Selection::Selected(id)
        })
    }

    /// Returns `true` when the backend has any learned keywords.
    #[must_use]
    pub fn is_trained(&self, backend_id: BackendId) -> bool {
        self.backends.contains_key(&backend_id)
    }

    /// Drops everything learned for a backend, returning whether it existed.
    pub fn forget(&mut self, backend_id: BackendId) -> bool {
        self.backends.remove(&backend_id).is_some()
    }

    /// Returns the number of trained backends.
    #[must_use]
    pub fn trained_backends(&self) -> usize {
        self.backends.len()
    }
}
