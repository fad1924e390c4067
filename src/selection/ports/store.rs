//! Persistence port for the keyword model.

use crate::selection::domain::KeywordModel;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for keyword model store operations.
pub type KeywordModelStoreResult<T> = Result<T, KeywordModelStoreError>;

/// Keyword model persistence contract.
///
/// The model is always read and written whole.
#[async_trait]
pub trait KeywordModelStore: Send + Sync {
    /// Loads the stored model; an empty model when nothing has been saved.
    async fn load(&self) -> KeywordModelStoreResult<KeywordModel>;

    /// Replaces the stored model.
    async fn save(&self, model: &KeywordModel) -> KeywordModelStoreResult<()>;
}

/// Errors returned by keyword model stores.
#[derive(Debug, Clone, Error)]
pub enum KeywordModelStoreError {
    /// The stored model could not be decoded.
    #[error("invalid persisted keyword model: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("keyword model persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl KeywordModelStoreError {
    /// Wraps a decoding error.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
