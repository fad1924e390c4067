//! File-backed backend registry storing one JSON document per descriptor.
//!
//! Records live at `<root>/<id>.json`. Writes go to a sibling `.tmp` file
//! which is then renamed over the record, so a crash mid-write never leaves a
//! truncated record behind. Filesystem calls run on the blocking thread pool.
//! The in-memory index is only updated after the filesystem operation
//! succeeds, and both happen under one write lock.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::backend::{
    domain::{BackendDescriptor, BackendId},
    ports::{
        BackendRegistryError, BackendRegistryRepository, BackendRegistryResult,
        repository::sort_for_listing,
    },
};

const RECORD_EXTENSION: &str = ".json";

/// Backend registry persisted as a directory of JSON records.
#[derive(Debug)]
pub struct JsonFileBackendRegistry {
    root: Utf8PathBuf,
    dir: Arc<Dir>,
    state: RwLock<HashMap<BackendId, BackendDescriptor>>,
}

fn record_name(id: BackendId) -> String {
    format!("{id}{RECORD_EXTENSION}")
}

impl JsonFileBackendRegistry {
    /// Opens (creating if needed) the registry directory and loads every
    /// record in it.
    ///
    /// # Errors
    ///
    /// Returns [`BackendRegistryError::Persistence`] when the directory cannot
    /// be created or read, and [`BackendRegistryError::InvalidPersistedData`]
    /// when a record is not a valid descriptor (including unknown `type`
    /// tags).
    pub fn open(root: impl AsRef<Utf8Path>) -> BackendRegistryResult<Self> {
        let root_path = root.as_ref().to_owned();
        std::fs::create_dir_all(&root_path).map_err(BackendRegistryError::persistence)?;
        let dir = Dir::open_ambient_dir(&root_path, ambient_authority())
            .map_err(BackendRegistryError::persistence)?;

        let backends = load_records(&dir)?;
        info!(path = %root_path, count = backends.len(), "loaded backend registry");

        Ok(Self {
            root: root_path,
            dir: Arc::new(dir),
            state: RwLock::new(backends),
        })
    }

    /// Returns the registry directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    async fn run_blocking<F, T>(&self, f: F) -> BackendRegistryResult<T>
    where
        F: FnOnce(&Dir) -> BackendRegistryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || f(&dir))
            .await
            .map_err(BackendRegistryError::persistence)?
    }
}

fn write_record(dir: &Dir, descriptor: &BackendDescriptor) -> BackendRegistryResult<()> {
    let body = serde_json::to_vec_pretty(descriptor).map_err(BackendRegistryError::persistence)?;
    let final_name = record_name(descriptor.id());
    let temp_name = format!("{final_name}.tmp");
    dir.write(&temp_name, body).map_err(BackendRegistryError::persistence)?;
    dir.rename(&temp_name, dir, &final_name)
        .map_err(BackendRegistryError::persistence)?;
    debug!(backend_id = %descriptor.id(), "persisted backend record");
    Ok(())
}

fn delete_record(dir: &Dir, id: BackendId) -> BackendRegistryResult<()> {
    match dir.remove_file(record_name(id)) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(BackendRegistryError::persistence(err)),
    }
}

fn load_records(dir: &Dir) -> BackendRegistryResult<HashMap<BackendId, BackendDescriptor>> {
    let mut backends = HashMap::new();
    for entry_result in dir.entries().map_err(BackendRegistryError::persistence)? {
        let entry = entry_result.map_err(BackendRegistryError::persistence)?;
        let file_name = entry
            .file_name()
            .map_err(BackendRegistryError::invalid_persisted_data)?;
        if !file_name.ends_with(RECORD_EXTENSION) {
            continue;
        }

        let raw = dir
            .read_to_string(&file_name)
            .map_err(BackendRegistryError::persistence)?;
        let descriptor: BackendDescriptor =
            serde_json::from_str(&raw).map_err(BackendRegistryError::invalid_persisted_data)?;
        backends.insert(descriptor.id(), descriptor);
    }
    Ok(backends)
}

#[async_trait]
impl BackendRegistryRepository for JsonFileBackendRegistry {
    async fn insert(&self, descriptor: &BackendDescriptor) -> BackendRegistryResult<()> {
        let mut state = self.state.write().await;
        if state.contains_key(&descriptor.id()) {
            return Err(BackendRegistryError::DuplicateBackend(descriptor.id()));
        }
        let record = descriptor.clone();
        self.run_blocking(move |dir| write_record(dir, &record)).await?;
        state.insert(descriptor.id(), descriptor.clone());
        Ok(())
    }

    async fn replace(&self, descriptor: &BackendDescriptor) -> BackendRegistryResult<()> {
        let mut state = self.state.write().await;
        if !state.contains_key(&descriptor.id()) {
            return Err(BackendRegistryError::NotFound(descriptor.id()));
        }
        let record = descriptor.clone();
        self.run_blocking(move |dir| write_record(dir, &record)).await?;
        state.insert(descriptor.id(), descriptor.clone());
        Ok(())
    }

    async fn remove(&self, id: BackendId) -> BackendRegistryResult<bool> {
        let mut state = self.state.write().await;
        if !state.contains_key(&id) {
            return Ok(false);
        }
        self.run_blocking(move |dir| delete_record(dir, id)).await?;
        state.remove(&id);
        Ok(true)
    }

    async fn find_by_id(&self, id: BackendId) -> BackendRegistryResult<Option<BackendDescriptor>> {
        let state = self.state.read().await;
        Ok(state.get(&id).cloned())
    }

    async fn list_all(&self) -> BackendRegistryResult<Vec<BackendDescriptor>> {
        let state = self.state.read().await;
        let mut all: Vec<BackendDescriptor> = state.values().cloned().collect();
        sort_for_listing(&mut all);
        Ok(all)
    }

    async fn clear(&self) -> BackendRegistryResult<usize> {
        let mut state = self.state.write().await;
        let ids: Vec<BackendId> = state.keys().copied().collect();
        let mut removed = 0;
        for id in ids {
            self.run_blocking(move |dir| delete_record(dir, id)).await?;
            state.remove(&id);
            removed += 1;
        }
        Ok(removed)
    }
}
