//! Repository port for backend descriptor persistence.

use crate::backend::domain::{BackendDescriptor, BackendId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for backend registry operations.
pub type BackendRegistryResult<T> = Result<T, BackendRegistryError>;

/// Backend registry persistence contract.
///
/// Mutations are serialized by implementations. A mutation that fails to
/// persist must not become visible to subsequent reads.
#[async_trait]
pub trait BackendRegistryRepository: Send + Sync {
    /// Stores a new descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`BackendRegistryError::DuplicateBackend`] when the identifier
    /// already exists.
    async fn insert(&self, descriptor: &BackendDescriptor) -> BackendRegistryResult<()>;

    /// Replaces an existing descriptor with the same identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BackendRegistryError::NotFound`] when the backend does not
    /// exist.
    async fn replace(&self, descriptor: &BackendDescriptor) -> BackendRegistryResult<()>;

    /// Removes a descriptor, returning whether one existed.
    async fn remove(&self, id: BackendId) -> BackendRegistryResult<bool>;

    /// Finds a descriptor by identifier.
    async fn find_by_id(&self, id: BackendId) -> BackendRegistryResult<Option<BackendDescriptor>>;

    /// Returns every descriptor ordered by creation time, then identifier.
    async fn list_all(&self) -> BackendRegistryResult<Vec<BackendDescriptor>>;

    /// Removes every descriptor, returning how many were removed.
    async fn clear(&self) -> BackendRegistryResult<usize>;
}

/// Errors returned by backend registry repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BackendRegistryError {
    /// A backend with the same identifier already exists.
    #[error("duplicate backend identifier: {0}")]
    DuplicateBackend(BackendId),

    /// The backend was not found.
    #[error("backend not found: {0}")]
    NotFound(BackendId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BackendRegistryError {
    /// Wraps a data-quality or deserialization error from persisted records.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Sorts descriptors into the canonical listing order.
pub(crate) fn sort_for_listing(descriptors: &mut [BackendDescriptor]) {
    descriptors.sort_by(|left, right| {
        left.created_at()
            .cmp(&right.created_at())
            .then_with(|| left.id().cmp(&right.id()))
    });
}
