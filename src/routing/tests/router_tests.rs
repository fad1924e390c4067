//! Unit tests for the request router.

use std::sync::Arc;

use crate::analysis::domain::{InputKind, Intent};
use crate::backend::{
    adapters::memory::InMemoryBackendRegistry,
    domain::{BackendDescriptor, BackendKind, BackendType},
    services::{BackendRegistryService, RegisterBackendRequest},
};
use crate::dispatch::{
    domain::{DispatchConfig, DispatchError},
    ports::{MockHttpTransport, MockProcessTransport},
    services::Junction,
};
use crate::routing::{RequestRouter, RouteError, RouteOutcome};
use crate::selection::{
    adapters::memory::InMemoryKeywordModelStore, domain::TrainingExample,
    services::BackendSelector,
};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::json;

type TestRouter = RequestRouter<
    InMemoryBackendRegistry,
    InMemoryKeywordModelStore,
    MockHttpTransport,
    MockProcessTransport,
    DefaultClock,
>;

struct Harness {
    registry: Arc<BackendRegistryService<InMemoryBackendRegistry, DefaultClock>>,
    selector: Arc<BackendSelector<InMemoryKeywordModelStore>>,
    router: TestRouter,
}

async fn harness(http: MockHttpTransport, process: MockProcessTransport) -> Harness {
    let clock = Arc::new(DefaultClock);
    let registry = Arc::new(BackendRegistryService::new(
        Arc::new(InMemoryBackendRegistry::new()),
        Arc::clone(&clock),
    ));
    let selector = Arc::new(
        BackendSelector::load(Arc::new(InMemoryKeywordModelStore::new()))
            .await
            .expect("load should succeed"),
    );
    let junction = Junction::new(
        Arc::new(http),
        Arc::new(process),
        clock,
        DispatchConfig::default(),
    );
    let router = RequestRouter::new(Arc::clone(&registry), Arc::clone(&selector), junction);
    Harness {
        registry,
        selector,
        router,
    }
}

async fn register(harness: &Harness, name: &str, kind: BackendKind) -> BackendDescriptor {
    harness
        .registry
        .register(RegisterBackendRequest::new(name, "test backend", kind))
        .await
        .expect("registration should succeed")
}

fn echoing_process() -> MockProcessTransport {
    let mut process = MockProcessTransport::new();
    process.expect_exchange().returning(|invocation, payload| {
        let mut echoed: serde_json::Value =
            serde_json::from_slice(payload).expect("payload should be JSON");
        echoed["handled_by"] = json!(invocation.program());
        Ok(echoed)
    });
    process
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_registry_routes_to_no_backend() {
    let harness = harness(MockHttpTransport::new(), MockProcessTransport::new()).await;

    let outcome = harness
        .router
        .route("find my file", InputKind::Text)
        .await
        .expect("routing should succeed");

    assert_eq!(outcome, RouteOutcome::NoBackendAvailable);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn trained_backend_receives_matching_request() {
    let harness = harness(MockHttpTransport::new(), echoing_process()).await;
    register(&harness, "writer", BackendKind::local_ai("writer").expect("valid")).await;
    let finder = register(&harness, "finder", BackendKind::local_ai("finder").expect("valid")).await;
    harness
        .selector
        .train(&[TrainingExample::new(
            finder.id(),
            "find my keys",
            Intent::Search,
            Vec::new(),
        )])
        .await
        .expect("training should succeed");

    let outcome = harness
        .router
        .route("Where did I find my file", InputKind::Speech)
        .await
        .expect("routing should succeed");

    let RouteOutcome::Dispatched { backend_id, result } = outcome else {
        panic!("expected a dispatch");
    };
    assert_eq!(backend_id, finder.id());
    assert_eq!(result["handled_by"], json!("finder"));
    assert_eq!(result["input_type"], json!("speech"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dispatch_failure_names_the_backend() {
    let mut http = MockHttpTransport::new();
    http.expect_post_json().returning(|_, _, _| {
        Err(DispatchError::HttpStatus {
            status: 502,
            body: "bad gateway".to_owned(),
        })
    });
    let harness = harness(http, MockProcessTransport::new()).await;
    let api = register(
        &harness,
        "hosted",
        BackendKind::api("https://x/y", "k").expect("valid"),
    )
    .await;

    let err = harness
        .router
        .route("hello", InputKind::Text)
        .await
        .expect_err("routing should fail");

    assert!(matches!(err, RouteError::Dispatch { backend_id, .. } if backend_id == api.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn broadcast_filters_by_type() {
    let harness = harness(MockHttpTransport::new(), echoing_process()).await;
    let local = register(&harness, "local", BackendKind::local_ai("local").expect("valid")).await;
    register(&harness, "hosted", BackendKind::api("https://x/y", "k").expect("valid")).await;

    let entries = harness
        .router
        .broadcast("hello", InputKind::Text, Some(BackendType::LocalAi))
        .await
        .expect("broadcast should succeed");

    assert_eq!(entries.len(), 1);
    let entry = entries.first().expect("one entry");
    assert_eq!(entry.backend_id(), local.id());
    assert!(entry.result().is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn retiring_a_backend_forgets_it_everywhere() {
    let harness = harness(MockHttpTransport::new(), echoing_process()).await;
    let local = register(&harness, "local", BackendKind::local_ai("local").expect("valid")).await;
    harness
        .selector
        .train(&[TrainingExample::new(
            local.id(),
            "hello",
            Intent::Unknown,
            Vec::new(),
        )])
        .await
        .expect("training should succeed");
    harness
        .router
        .route("hello", InputKind::Text)
        .await
        .expect("routing should succeed");

    assert!(harness.router.retire_backend(local.id()).await.expect("retire"));

    assert!(!harness.selector.snapshot().is_trained(local.id()));
    assert!(harness.router.junction().session(local.id()).is_none());
    assert!(!harness.router.retire_backend(local.id()).await.expect("retire"));
}
