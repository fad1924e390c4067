//! Backend selector service.
//!
//! Holds the live keyword model, answers selection queries from it, and
//! persists every training batch through a [`KeywordModelStore`].

use crate::analysis::domain::AnalyzedInput;
use crate::backend::domain::{BackendDescriptor, BackendId};
use crate::selection::{
    domain::{KeywordModel, Selection, TrainingExample},
    ports::{KeywordModelStore, KeywordModelStoreResult},
};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Keyword-frequency backend selector.
///
/// Selection reads are lock-scoped and never wait on persistence. Training
/// batches are serialized; each one is applied to a copy of the model, saved,
/// and only then swapped in, so a failed save leaves the live model
/// unchanged.
pub struct BackendSelector<S>
where
    S: KeywordModelStore,
{
    store: Arc<S>,
    model: RwLock<KeywordModel>,
    writer: Mutex<()>,
}

impl<S> BackendSelector<S>
where
    S: KeywordModelStore,
{
    /// Creates a selector from the model currently held by `store`.
    ///
    /// # Errors
    ///
    /// Returns store errors when the model cannot be loaded.
    pub async fn load(store: Arc<S>) -> KeywordModelStoreResult<Self> {
        let model = store.load().await?;
        info!(
            trained_backends = model.trained_backends(),
            "loaded backend selector"
        );
        Ok(Self {
            store,
            model: RwLock::new(model),
            writer: Mutex::new(()),
        })
    }

    /// Picks the best backend among `candidates` for `input`.
    ///
    /// Returns [`Selection::NoBackendAvailable`] when `candidates` is empty.
    #[must_use]
    pub fn select_best(
        &self,
        input: &AnalyzedInput,
        candidates: &[BackendDescriptor],
    ) -> Selection {
        if candidates.is_empty() {
            debug!("no candidate backends to select from");
            return Selection::NoBackendAvailable;
        }

        let keywords = input.selection_keywords();
        let model = self.model.read().unwrap_or_else(PoisonError::into_inner);
        let selection = model.select(&keywords, candidates.iter().map(BackendDescriptor::id));
        debug!(%selection, candidates = candidates.len(), "selected backend");
        selection
    }

    /// Returns the score `input` earns for one backend.
    #[must_use]
    pub fn score(&self, input: &AnalyzedInput, backend_id: BackendId) -> u64 {
        let keywords = input.selection_keywords();
        self.model
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .score(backend_id, &keywords)
    }

    /// Learns from a batch of examples and persists the updated model.
    ///
    /// # Errors
    ///
    /// Returns store errors when the updated model cannot be saved; the live
    /// model is left unchanged in that case.
    pub async fn train(&self, examples: &[TrainingExample]) -> KeywordModelStoreResult<()> {
        let _writer = self.writer.lock().await;
        let mut updated = self.snapshot();
        updated.train(examples);
        self.store.save(&updated).await?;
        *self.model.write().unwrap_or_else(PoisonError::into_inner) = updated;
        info!(examples = examples.len(), "trained backend selector");
        Ok(())
    }

    /// Drops everything learned for `backend_id` and persists the result.
    ///
    /// # Errors
    ///
    /// Returns store errors when the updated model cannot be saved.
    pub async fn forget(&self, backend_id: BackendId) -> KeywordModelStoreResult<bool> {
        let _writer = self.writer.lock().await;
        let mut updated = self.snapshot();
        if !updated.forget(backend_id) {
            return Ok(false);
        }
        self.store.save(&updated).await?;
        *self.model.write().unwrap_or_else(PoisonError::into_inner) = updated;
        info!(%backend_id, "forgot backend keywords");
        Ok(true)
    }

    /// Replaces the live model with the stored one.
    ///
    /// # Errors
    ///
    /// Returns store errors when the model cannot be loaded.
    pub async fn reload(&self) -> KeywordModelStoreResult<()> {
        let _writer = self.writer.lock().await;
        let model = self.store.load().await?;
        *self.model.write().unwrap_or_else(PoisonError::into_inner) = model;
        Ok(())
    }

    /// Returns a copy of the live model.
    #[must_use]
    pub fn snapshot(&self) -> KeywordModel {
        self.model
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
