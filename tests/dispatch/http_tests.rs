//! HTTP dispatch through `reqwest` against a mock server.

use super::helpers::{analyzed, backend, junction};
use mockito::{Matcher, Server};
use rstest::rstest;
use serde_json::json;
use switchyard::backend::domain::BackendKind;
use switchyard::dispatch::domain::{DispatchConfig, DispatchError, DispatchErrorKind};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn api_success_returns_body_verbatim() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/run")
        .match_header("authorization", "Bearer secret-token")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "cleaned_input": "find my file",
            "intent": "search"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"answer": "in your drawer", "confidence": 0.9}"#)
        .create_async()
        .await;
    let junction = junction(DispatchConfig::default());
    let api = backend(
        "hosted",
        BackendKind::api(format!("{}/v1/run", server.url()), "secret-token").expect("valid api"),
    );

    let result = junction
        .process(&api, &analyzed("Find my file"))
        .await
        .expect("dispatch should succeed");

    mock.assert_async().await;
    assert_eq!(result, json!({"answer": "in your drawer", "confidence": 0.9}));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn api_server_error_carries_response_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/y")
        .with_status(500)
        .with_body("model overloaded")
        .create_async()
        .await;
    let junction = junction(DispatchConfig::default());
    let api = backend(
        "hosted",
        BackendKind::api(format!("{}/y", server.url()), "k").expect("valid api"),
    );

    let err = junction
        .process(&api, &analyzed("find my file"))
        .await
        .expect_err("dispatch should fail");

    assert_eq!(err.kind(), DispatchErrorKind::Transport);
    assert!(matches!(
        &err,
        DispatchError::HttpStatus { status: 500, body } if body == "model overloaded"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn api_non_json_success_is_a_format_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/y")
        .with_status(200)
        .with_body("<html>hello</html>")
        .create_async()
        .await;
    let junction = junction(DispatchConfig::default());
    let api = backend(
        "hosted",
        BackendKind::api(format!("{}/y", server.url()), "k").expect("valid api"),
    );

    let err = junction
        .process(&api, &analyzed("hi"))
        .await
        .expect_err("dispatch should fail");

    assert_eq!(err.kind(), DispatchErrorKind::Format);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_200_success_status_is_still_a_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/y")
        .with_status(201)
        .with_body("{}")
        .create_async()
        .await;
    let junction = junction(DispatchConfig::default());
    let api = backend(
        "hosted",
        BackendKind::api(format!("{}/y", server.url()), "k").expect("valid api"),
    );

    let err = junction
        .process(&api, &analyzed("hi"))
        .await
        .expect_err("dispatch should fail");

    assert!(matches!(&err, DispatchError::HttpStatus { status: 201, .. }));
}
