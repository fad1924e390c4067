//! Integration tests for [`JsonFileKeywordModelStore`].

use std::sync::Arc;

use camino::Utf8PathBuf;
use rstest::rstest;
use serde_json::{Value, json};
use switchyard::analysis::domain::Intent;
use switchyard::backend::domain::BackendId;
use switchyard::selection::{
    adapters::json_file::JsonFileKeywordModelStore,
    domain::TrainingExample,
    ports::{KeywordModelStore, KeywordModelStoreError},
    services::BackendSelector,
};
use tempfile::TempDir;

fn model_path(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join("state").join("selector_model.json"))
        .expect("UTF-8 temp path")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_file_is_initialized_empty() {
    let dir = TempDir::new().expect("temp dir");
    let path = model_path(&dir);

    let store = JsonFileKeywordModelStore::open(&path).expect("store should open");

    assert_eq!(
        std::fs::read_to_string(&path).expect("model file").trim(),
        "{}"
    );
    assert_eq!(
        store.load().await.expect("load").trained_backends(),
        0
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn training_is_written_wholesale_and_reloaded() {
    let dir = TempDir::new().expect("temp dir");
    let path = model_path(&dir);
    let backend = BackendId::new();
    let selector = BackendSelector::load(Arc::new(
        JsonFileKeywordModelStore::open(&path).expect("store should open"),
    ))
    .await
    .expect("load");

    selector
        .train(&[
            TrainingExample::new(backend, "find files", Intent::Search, Vec::new()),
            TrainingExample::new(backend, "find notes", Intent::Search, Vec::new()),
        ])
        .await
        .expect("training should succeed");

    let on_disk: Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("model file"))
            .expect("model JSON");
    assert_eq!(
        on_disk,
        json!({ (backend.to_string()): {"find": 2, "files": 1, "notes": 1, "search": 2} })
    );

    let reopened = BackendSelector::load(Arc::new(
        JsonFileKeywordModelStore::open(&path).expect("store should reopen"),
    ))
    .await
    .expect("load");
    assert_eq!(reopened.snapshot(), selector.snapshot());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn corrupt_model_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let path = model_path(&dir);
    let store = JsonFileKeywordModelStore::open(&path).expect("store should open");
    std::fs::write(&path, "{not json").expect("corrupt file");

    let result = store.load().await;

    assert!(matches!(
        result,
        Err(KeywordModelStoreError::InvalidPersistedData(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "current_thread")]
async fn interleaved_saves_and_loads_stay_consistent() {
    let dir = TempDir::new().expect("temp dir");
    let path = model_path(&dir);
    let selector = Arc::new(
        BackendSelector::load(Arc::new(
            JsonFileKeywordModelStore::open(&path).expect("store should open"),
        ))
        .await
        .expect("selector should load"),
    );
    let backend = BackendId::new();

    let tasks: Vec<_> = ["weather", "forecast", "rain"]
        .into_iter()
        .map(|word| {
            let selector = Arc::clone(&selector);
            let example = TrainingExample::new(backend, word, Intent::Unknown, Vec::new());
            tokio::spawn(async move { selector.train(&[example]).await })
        })
        .collect();
    for task in tasks {
        task.await
            .expect("task should not panic")
            .expect("training should succeed");
    }

    let reopened = JsonFileKeywordModelStore::open(&path).expect("store should reopen");
    let model = reopened.load().await.expect("load");
    assert_eq!(model.trained_backends(), 1);
    for word in ["weather", "forecast", "rain"] {
        assert_eq!(model.count(backend, word), 1);
    }
    assert!(!path.with_extension("json.tmp").exists());
}
