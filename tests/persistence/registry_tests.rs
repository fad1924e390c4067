//! Integration tests for [`JsonFileBackendRegistry`].

use std::sync::Arc;

use camino::Utf8PathBuf;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use switchyard::backend::{
    adapters::json_file::JsonFileBackendRegistry,
    domain::{BackendKind, BackendType, BackendUpdate},
    ports::BackendRegistryError,
    services::{BackendRegistryService, RegisterBackendRequest},
};
use tempfile::TempDir;

type FileService = BackendRegistryService<JsonFileBackendRegistry, DefaultClock>;

struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn service(&self) -> FileService {
        let registry = JsonFileBackendRegistry::open(&self.root).expect("registry should open");
        BackendRegistryService::new(Arc::new(registry), Arc::new(DefaultClock))
    }
}

#[fixture]
fn workspace() -> Workspace {
    let dir = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().join("backends")).expect("UTF-8 temp path");
    Workspace { _dir: dir, root }
}

fn read_record(workspace: &Workspace, name: &str) -> Value {
    let raw = std::fs::read_to_string(workspace.root.join(name)).expect("record should exist");
    serde_json::from_str(&raw).expect("record should be JSON")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn records_survive_reopen(workspace: Workspace) {
    let first = workspace.service();
    let api = first
        .register(RegisterBackendRequest::new(
            "Hosted",
            "Remote API",
            BackendKind::api("https://api.example.com/run", "token").expect("valid api"),
        ))
        .await
        .expect("registration should succeed");
    let local = first
        .register(RegisterBackendRequest::new(
            "Local",
            "Local model",
            BackendKind::local_ai("ollama run llama3").expect("valid command"),
        ))
        .await
        .expect("registration should succeed");

    let reopened = workspace.service();

    assert_eq!(reopened.count().await.expect("count"), 2);
    assert_eq!(
        reopened.find_by_id(api.id()).await.expect("lookup"),
        Some(api.clone())
    );
    let locals = reopened
        .list_by_type(BackendType::LocalAi)
        .await
        .expect("list");
    assert_eq!(locals, [local]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn record_uses_wire_keys(workspace: Workspace) {
    let service = workspace.service();
    let api = service
        .register(RegisterBackendRequest::new(
            "Hosted",
            "Remote API",
            BackendKind::api("https://api.example.com/run", "token").expect("valid api"),
        ))
        .await
        .expect("registration should succeed");

    let record = read_record(&workspace, &format!("{}.json", api.id()));

    assert_eq!(record["id"], json!(api.id()));
    assert_eq!(record["type"], "api");
    assert_eq!(record["api-endpoint"], "https://api.example.com/run");
    assert_eq!(record["api-key"], "token");
    assert!(record.get("ai-file").is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_and_delete_reach_disk(workspace: Workspace) {
    let service = workspace.service();
    let bot = service
        .register(RegisterBackendRequest::new(
            "Bot",
            "Scripted bot",
            BackendKind::bot("bots/echo.py").expect("valid bot"),
        ))
        .await
        .expect("registration should succeed");
    let record_name = format!("{}.json", bot.id());

    assert!(
        service
            .update(bot.id(), BackendUpdate::new().with_name("Renamed"))
            .await
            .expect("update")
    );
    assert_eq!(read_record(&workspace, &record_name)["name"], "Renamed");

    assert!(service.delete(bot.id()).await.expect("delete"));
    assert!(!workspace.root.join(&record_name).exists());
    assert_eq!(workspace.service().count().await.expect("count"), 0);
}

#[rstest]
fn unknown_backend_type_is_rejected_on_open(workspace: Workspace) {
    std::fs::create_dir_all(&workspace.root).expect("create root");
    let record = json!({
        "id": "6f1c3f5e-8a43-4a8e-9f59-0c3c1c3e8b11",
        "type": "quantum_ai",
        "name": "Mystery",
        "description": "Unknown kind",
        "created_at": "2025-01-01T00:00:00Z"
    });
    std::fs::write(
        workspace.root.join("6f1c3f5e-8a43-4a8e-9f59-0c3c1c3e8b11.json"),
        record.to_string(),
    )
    .expect("write record");

    let result = JsonFileBackendRegistry::open(&workspace.root);

    assert!(matches!(
        result,
        Err(BackendRegistryError::InvalidPersistedData(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clear_removes_every_record(workspace: Workspace) {
    let service = workspace.service();
    for name in ["a", "b", "c"] {
        service
            .register(RegisterBackendRequest::new(
                name,
                "bulk",
                BackendKind::local_ai("cat").expect("valid command"),
            ))
            .await
            .expect("registration should succeed");
    }

    assert_eq!(service.clear().await.expect("clear"), 3);
    let leftover = std::fs::read_dir(&workspace.root)
        .expect("read root")
        .count();
    assert_eq!(leftover, 0);
}

#[rstest]
#[tokio::test(flavor = "current_thread")]
async fn concurrent_registrations_are_all_persisted(workspace: Workspace) {
    let service = Arc::new(workspace.service());
    let tasks: Vec<_> = (0..8)
        .map(|index| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .register(RegisterBackendRequest::new(
                        format!("Local {index}"),
                        "Local model",
                        BackendKind::local_ai("cat").expect("valid command"),
                    ))
                    .await
            })
        })
        .collect();
    for task in tasks {
        task.await
            .expect("task should not panic")
            .expect("registration should succeed");
    }

    assert_eq!(service.count().await.expect("count"), 8);
    assert_eq!(workspace.service().count().await.expect("count"), 8);
    let leftovers: Vec<_> = std::fs::read_dir(&workspace.root)
        .expect("registry dir")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_updates_are_both_persisted(workspace: Workspace) {
    let service = workspace.service();
    let created = service
        .register(RegisterBackendRequest::new(
            "Local",
            "Local model",
            BackendKind::local_ai("cat").expect("valid command"),
        ))
        .await
        .expect("registration should succeed");

    let (renamed, described) = tokio::join!(
        service.update(created.id(), BackendUpdate::new().with_name("Renamed")),
        service.update(
            created.id(),
            BackendUpdate::new().with_description("Fresh description"),
        ),
    );
    assert!(renamed.expect("rename should succeed"));
    assert!(described.expect("description update should succeed"));

    let record = read_record(&workspace, &format!("{}.json", created.id()));
    assert_eq!(record["name"], "Renamed");
    assert_eq!(record["description"], "Fresh description");
}
