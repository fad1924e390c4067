//! `tokio::process`-backed subprocess transport.

use crate::dispatch::{
    domain::{DispatchError, DispatchResult, ProcessInvocation},
    ports::ProcessTransport,
};
use async_trait::async_trait;
use serde_json::Value;
use std::io;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Runs each exchange in a fresh child process.
///
/// Children are killed when the exchange future is dropped, so a timed-out
/// dispatch does not leave a process behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessTransport;

impl TokioProcessTransport {
    /// Creates the transport.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessTransport for TokioProcessTransport {
    async fn exchange(
        &self,
        invocation: &ProcessInvocation,
        input: &[u8],
    ) -> DispatchResult<Value> {
        debug!(program = invocation.program(), "spawning backend process");
        let mut child = Command::new(invocation.program())
            .args(invocation.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| DispatchError::spawn(invocation.program(), err))?;

        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut pipe) = stdin {
                match pipe.write_all(input).await {
                    Ok(()) => {}
                    // The child may exit without reading its input.
                    Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {}
                    Err(err) => return Err(err),
                }
            }
            Ok(())
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output.map_err(DispatchError::io)?;
        fed.map_err(DispatchError::io)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            warn!(
                program = invocation.program(),
                exit_code = output.status.code(),
                "backend process failed"
            );
            return Err(DispatchError::ProcessFailed {
                exit_code: output.status.code(),
                stderr,
            });
        }

        serde_json::from_slice(&output.stdout).map_err(DispatchError::invalid_output)
    }
}
