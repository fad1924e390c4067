//! In-memory repository for backend registry tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::backend::{
    domain::{BackendDescriptor, BackendId},
    ports::{
        BackendRegistryError, BackendRegistryRepository, BackendRegistryResult,
        repository::sort_for_listing,
    },
};

/// Thread-safe in-memory backend registry repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackendRegistry {
    state: Arc<RwLock<HashMap<BackendId, BackendDescriptor>>>,
}

impl InMemoryBackendRegistry {
    /// Creates an empty in-memory registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> BackendRegistryError {
    BackendRegistryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl BackendRegistryRepository for InMemoryBackendRegistry {
    async fn insert(&self, descriptor: &BackendDescriptor) -> BackendRegistryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.contains_key(&descriptor.id()) {
            return Err(BackendRegistryError::DuplicateBackend(descriptor.id()));
        }
        state.insert(descriptor.id(), descriptor.clone());
        Ok(())
    }

    async fn replace(&self, descriptor: &BackendDescriptor) -> BackendRegistryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let slot = state
            .get_mut(&descriptor.id())
            .ok_or(BackendRegistryError::NotFound(descriptor.id()))?;
        *slot = descriptor.clone();
        Ok(())
    }

    async fn remove(&self, id: BackendId) -> BackendRegistryResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        Ok(state.remove(&id).is_some())
    }

    async fn find_by_id(&self, id: BackendId) -> BackendRegistryResult<Option<BackendDescriptor>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.get(&id).cloned())
    }

    async fn list_all(&self) -> BackendRegistryResult<Vec<BackendDescriptor>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut all: Vec<BackendDescriptor> = state.values().cloned().collect();
        sort_for_listing(&mut all);
        Ok(all)
    }

    async fn clear(&self) -> BackendRegistryResult<usize> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state.len();
        state.clear();
        Ok(removed)
    }
}
