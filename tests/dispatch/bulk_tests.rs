//! Concurrent fan-out with per-backend failure isolation.

use super::helpers::{analyzed, backend, junction};
use rstest::rstest;
use serde_json::json;
use switchyard::backend::domain::BackendKind;
use switchyard::dispatch::domain::{DispatchConfig, DispatchErrorKind};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn one_failing_backend_does_not_affect_siblings() {
    let junction = junction(DispatchConfig::default());
    let input = analyzed("find my file");
    let backends = vec![
        backend("first", BackendKind::local_ai("cat").expect("valid command")),
        backend("second", BackendKind::local_ai("cat").expect("valid command")),
        backend("broken", BackendKind::local_ai("false").expect("valid command")),
        backend("fourth", BackendKind::local_ai("cat").expect("valid command")),
    ];

    let entries = junction.bulk_process(&backends, &input).await;

    assert_eq!(entries.len(), backends.len());
    let ids: Vec<_> = entries.iter().map(|entry| entry.backend_id()).collect();
    let expected: Vec<_> = backends.iter().map(|backend| backend.id()).collect();
    assert_eq!(ids, expected);
    let failures: Vec<usize> = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.failure().is_some())
        .map(|(index, _)| index)
        .collect();
    assert_eq!(failures, [2]);
    for entry in entries.iter().filter(|entry| entry.failure().is_none()) {
        assert_eq!(
            entry.result().map(|value| &value["intent"]),
            Some(&json!("search"))
        );
    }
    let failure = entries
        .get(2)
        .and_then(|entry| entry.failure())
        .expect("failure entry");
    assert_eq!(failure.kind(), DispatchErrorKind::Transport);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_results_serialize_per_backend() {
    let junction = junction(DispatchConfig::default());
    let backends = vec![
        backend("ok", BackendKind::local_ai("cat").expect("valid command")),
        backend("bad", BackendKind::bot("/no/such/script.py").expect("valid bot")),
    ];

    let entries = junction.bulk_process(&backends, &analyzed("hi")).await;
    let rendered = serde_json::to_value(&entries).expect("serializable");

    let first = backends.first().expect("two backends");
    assert_eq!(rendered[0]["backend_id"], json!(first.id()));
    assert_eq!(rendered[0]["result"]["cleaned_input"], "hi");
    assert_eq!(rendered[1]["error"]["kind"], "configuration");
    assert_eq!(
        rendered[1]["error"]["message"],
        "bot script not found: /no/such/script.py"
    );
}
