//! Keyword model stored as a single JSON document.

use crate::selection::{
    domain::KeywordModel,
    ports::{KeywordModelStore, KeywordModelStoreError, KeywordModelStoreResult},
};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::sync::Arc;
use tracing::{debug, info};

const EMPTY_MODEL: &str = "{}";

/// Keyword model persisted at a fixed file path.
///
/// The file is created holding an empty model when absent, and rewritten
/// wholesale (temp file + rename) on every save. Reads and writes run on the
/// blocking thread pool.
#[derive(Debug)]
pub struct JsonFileKeywordModelStore {
    path: Utf8PathBuf,
    dir: Arc<Dir>,
    file_name: Arc<str>,
}

impl JsonFileKeywordModelStore {
    /// Opens the store, initializing an empty model file when none exists.
    ///
    /// # Errors
    ///
    /// Returns [`KeywordModelStoreError::Persistence`] when the parent
    /// directory cannot be created or opened, when `path` has no file name,
    /// or when the empty model cannot be written.
    pub fn open(path: impl AsRef<Utf8Path>) -> KeywordModelStoreResult<Self> {
        let model_path = path.as_ref().to_owned();
        let file_name = model_path
            .file_name()
            .ok_or_else(|| {
                KeywordModelStoreError::persistence(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("keyword model path '{model_path}' has no file name"),
                ))
            })?
            .to_owned();
        let parent = match model_path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent.to_owned(),
            _ => Utf8PathBuf::from("."),
        };

        std::fs::create_dir_all(&parent).map_err(KeywordModelStoreError::persistence)?;
        let dir = Dir::open_ambient_dir(&parent, ambient_authority())
            .map_err(KeywordModelStoreError::persistence)?;

        if !dir.exists(&file_name) {
            dir.write(&file_name, EMPTY_MODEL)
                .map_err(KeywordModelStoreError::persistence)?;
            info!(path = %model_path, "initialized empty keyword model");
        }

        Ok(Self {
            path: model_path,
            dir: Arc::new(dir),
            file_name: Arc::from(file_name),
        })
    }

    /// Returns the model file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    async fn run_blocking<F, T>(&self, f: F) -> KeywordModelStoreResult<T>
    where
        F: FnOnce(&Dir, &str) -> KeywordModelStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        let file_name = Arc::clone(&self.file_name);
        tokio::task::spawn_blocking(move || f(&dir, &file_name))
            .await
            .map_err(KeywordModelStoreError::persistence)?
    }
}

#[async_trait]
impl KeywordModelStore for JsonFileKeywordModelStore {
    async fn load(&self) -> KeywordModelStoreResult<KeywordModel> {
        let raw = self
            .run_blocking(|dir, file_name| {
                dir.read_to_string(file_name)
                    .map_err(KeywordModelStoreError::persistence)
            })
            .await?;
        let model =
            serde_json::from_str(&raw).map_err(KeywordModelStoreError::invalid_persisted_data)?;
        debug!(path = %self.path, "loaded keyword model");
        Ok(model)
    }

    async fn save(&self, model: &KeywordModel) -> KeywordModelStoreResult<()> {
        let body = serde_json::to_vec(model).map_err(KeywordModelStoreError::persistence)?;
        self.run_blocking(move |dir, file_name| {
            let temp_name = format!("{file_name}.tmp");
            dir.write(&temp_name, body)
                .map_err(KeywordModelStoreError::persistence)?;
            dir.rename(&temp_name, dir, file_name)
                .map_err(KeywordModelStoreError::persistence)
        })
        .await?;
        debug!(path = %self.path, "saved keyword model");
        Ok(())
    }
}
