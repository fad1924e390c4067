//! Service layer for backend registration and lookup.
//!
//! Provides [`BackendRegistryService`] which coordinates registration,
//! partial updates, deletion, and filtered discovery.

use crate::backend::{
    domain::{
        BackendDescriptor, BackendDomainError, BackendId, BackendKind, BackendType, BackendUpdate,
    },
    ports::{BackendRegistryError, BackendRegistryRepository},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

/// Request payload for registering a new backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterBackendRequest {
    name: String,
    description: String,
    kind: BackendKind,
}

impl RegisterBackendRequest {
    /// Creates a request with the common fields and a validated kind.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: BackendKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
        }
    }
}

/// Service-level errors for backend registry operations.
#[derive(Debug, Error)]
pub enum BackendRegistryServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BackendDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] BackendRegistryError),
}

/// Result type for backend registry service operations.
pub type BackendRegistryServiceResult<T> = Result<T, BackendRegistryServiceError>;

/// Backend registration and discovery orchestration service.
///
/// Partial updates read, modify, and replace a record under one writer guard,
/// so concurrent updates through the same service never overwrite each other.
#[derive(Clone)]
pub struct BackendRegistryService<R, C>
where
    R: BackendRegistryRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    writer: Arc<Mutex<()>>,
}

impl<R, C> BackendRegistryService<R, C>
where
    R: BackendRegistryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new backend registry service.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Registers a new backend and returns its descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`BackendRegistryServiceError`] when input validation fails or
    /// the repository rejects persistence.
    pub async fn register(
        &self,
        request: RegisterBackendRequest,
    ) -> BackendRegistryServiceResult<BackendDescriptor> {
        let RegisterBackendRequest {
            name,
            description,
            kind,
        } = request;

        let descriptor = BackendDescriptor::new(name, description, kind, &*self.clock)?;
        self.repository.insert(&descriptor).await?;
        info!(
            backend_id = %descriptor.id(),
            kind = %descriptor.backend_type(),
            "registered backend"
        );
        Ok(descriptor)
    }

    /// Finds a descriptor by identifier.
    ///
    /// Returns `Ok(None)` when no backend has the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`BackendRegistryServiceError::Repository`] when persistence
    /// lookup fails.
    pub async fn find_by_id(
        &self,
        id: BackendId,
    ) -> BackendRegistryServiceResult<Option<BackendDescriptor>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns every registered backend in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`BackendRegistryServiceError::Repository`] when persistence
    /// lookup fails.
    pub async fn list_all(&self) -> BackendRegistryServiceResult<Vec<BackendDescriptor>> {
        Ok(self.repository.list_all().await?)
    }

    /// Returns the registered backends of one type, in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`BackendRegistryServiceError::Repository`] when persistence
    /// lookup fails.
    pub async fn list_by_type(
        &self,
        backend_type: BackendType,
    ) -> BackendRegistryServiceResult<Vec<BackendDescriptor>> {
        let all = self.repository.list_all().await?;
        Ok(all
            .into_iter()
            .filter(|descriptor| descriptor.backend_type() == backend_type)
            .collect())
    }

    /// Returns the number of registered backends.
    ///
    /// # Errors
    ///
    /// Returns [`BackendRegistryServiceError::Repository`] when persistence
    /// lookup fails.
    pub async fn count(&self) -> BackendRegistryServiceResult<usize> {
        Ok(self.repository.list_all().await?.len())
    }

    /// Applies a partial update.
    ///
    /// Returns `Ok(false)` when no backend has the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`BackendRegistryServiceError::Domain`] when the update holds
    /// blank values, or [`BackendRegistryServiceError::Repository`] when
    /// persistence fails.
    pub async fn update(
        &self,
        id: BackendId,
        update: BackendUpdate,
    ) -> BackendRegistryServiceResult<bool> {
        let _writer = self.writer.lock().await;
        let Some(current) = self.repository.find_by_id(id).await? else {
            return Ok(false);
        };

        let updated = current.with_update(update)?;
        match self.repository.replace(&updated).await {
            Ok(()) => {
                info!(backend_id = %id, "updated backend");
                Ok(true)
            }
            Err(BackendRegistryError::NotFound(_)) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// Deletes a backend.
    ///
    /// Returns `Ok(false)` when no backend has the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`BackendRegistryServiceError::Repository`] when persistence
    /// fails.
    pub async fn delete(&self, id: BackendId) -> BackendRegistryServiceResult<bool> {
        let removed = self.repository.remove(id).await?;
        if removed {
            info!(backend_id = %id, "deleted backend");
        }
        Ok(removed)
    }

    /// Deletes every backend and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`BackendRegistryServiceError::Repository`] when persistence
    /// fails.
    pub async fn clear(&self) -> BackendRegistryServiceResult<usize> {
        let removed = self.repository.clear().await?;
        info!(removed, "cleared backend registry");
        Ok(removed)
    }
}
