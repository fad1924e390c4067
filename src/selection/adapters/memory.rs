//! In-memory keyword model store.

use crate::selection::{
    domain::KeywordModel,
    ports::{KeywordModelStore, KeywordModelStoreError, KeywordModelStoreResult},
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Keyword model store kept in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeywordModelStore {
    model: Arc<RwLock<KeywordModel>>,
}

impl InMemoryKeywordModelStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `model`.
    #[must_use]
    pub fn with_model(model: KeywordModel) -> Self {
        Self {
            model: Arc::new(RwLock::new(model)),
        }
    }
}

fn lock_error(err: impl ToString) -> KeywordModelStoreError {
    KeywordModelStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl KeywordModelStore for InMemoryKeywordModelStore {
    async fn load(&self) -> KeywordModelStoreResult<KeywordModel> {
        let model = self.model.read().map_err(lock_error)?;
        Ok(model.clone())
    }

    async fn save(&self, model: &KeywordModel) -> KeywordModelStoreResult<()> {
        let mut stored = self.model.write().map_err(lock_error)?;
        *stored = model.clone();
        Ok(())
    }
}
