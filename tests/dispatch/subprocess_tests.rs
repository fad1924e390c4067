//! Subprocess dispatch through `tokio::process`.

use std::time::Duration;

use super::helpers::{analyzed, backend, junction, write_script};
use rstest::rstest;
use switchyard::backend::domain::BackendKind;
use switchyard::dispatch::domain::{DispatchConfig, DispatchError, DispatchErrorKind};
use tempfile::TempDir;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn local_ai_echo_returns_input_unchanged() {
    let junction = junction(DispatchConfig::default());
    let input = analyzed("find my file");
    let echo = backend("echo", BackendKind::local_ai("cat").expect("valid command"));

    let result = junction
        .process(&echo, &input)
        .await
        .expect("dispatch should succeed");

    assert_eq!(result, serde_json::to_value(&input).expect("serializable"));
    assert_eq!(result["cleaned_input"], "find my file");
    assert_eq!(result["intent"], "search");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bot_script_runs_under_configured_interpreter() {
    let dir = TempDir::new().expect("temp dir");
    let script = write_script(&dir, "echo_bot.sh", "cat\n").expect("script");
    let junction = junction(DispatchConfig::default().with_script_interpreter("sh"));
    let input = analyzed("Tell me about Paris");
    let bot = backend("bot", BackendKind::bot(script).expect("valid bot"));

    let result = junction
        .process(&bot, &input)
        .await
        .expect("dispatch should succeed");

    assert_eq!(result["intent"], "info");
    assert_eq!(result["entities"]["names"][0], "Tell");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn custom_ai_with_script_only_runs_script() {
    let dir = TempDir::new().expect("temp dir");
    let script = write_script(&dir, "reply.sh", "cat > /dev/null\necho '{\"ok\": true}'\n")
        .expect("script");
    let junction = junction(DispatchConfig::default().with_script_interpreter("sh"));
    let custom = backend(
        "custom",
        BackendKind::custom_ai(Some(script), None).expect("valid custom"),
    );

    let result = junction
        .process(&custom, &analyzed("hi"))
        .await
        .expect("dispatch should succeed");

    assert_eq!(result, serde_json::json!({"ok": true}));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn nonzero_exit_carries_stderr() {
    let dir = TempDir::new().expect("temp dir");
    let script = write_script(
        &dir,
        "failing.sh",
        "cat > /dev/null\necho 'model exploded' >&2\nexit 3\n",
    )
    .expect("script");
    let junction = junction(DispatchConfig::default().with_script_interpreter("sh"));
    let bot = backend("bot", BackendKind::bot(script).expect("valid bot"));

    let err = junction
        .process(&bot, &analyzed("hi"))
        .await
        .expect_err("dispatch should fail");

    assert_eq!(err.kind(), DispatchErrorKind::Transport);
    assert!(matches!(
        &err,
        DispatchError::ProcessFailed { exit_code: Some(3), stderr } if stderr == "model exploded"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_json_output_is_a_format_error() {
    let junction = junction(DispatchConfig::default());
    let noisy = backend(
        "noisy",
        BackendKind::local_ai("echo definitely not json").expect("valid command"),
    );

    let err = junction
        .process(&noisy, &analyzed("hi"))
        .await
        .expect_err("dispatch should fail");

    assert_eq!(err.kind(), DispatchErrorKind::Format);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_program_is_a_transport_error() {
    let junction = junction(DispatchConfig::default());
    let ghost = backend(
        "ghost",
        BackendKind::local_ai("switchyard-no-such-binary --flag").expect("valid command"),
    );

    let err = junction
        .process(&ghost, &analyzed("hi"))
        .await
        .expect_err("dispatch should fail");

    assert!(matches!(&err, DispatchError::Spawn { program, .. } if program == "switchyard-no-such-binary"));
    assert_eq!(err.kind(), DispatchErrorKind::Transport);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn hung_process_times_out() {
    let limit = Duration::from_millis(200);
    let junction = junction(DispatchConfig::default().with_dispatch_timeout(Some(limit)));
    let sleepy = backend("sleepy", BackendKind::local_ai("sleep 10").expect("valid command"));

    let err = junction
        .process(&sleepy, &analyzed("hi"))
        .await
        .expect_err("dispatch should time out");

    assert_eq!(err.kind(), DispatchErrorKind::Timeout);
    assert_eq!(junction.active_session_count(), 1);
}
