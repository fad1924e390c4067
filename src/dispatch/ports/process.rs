//! Subprocess request/response port.

use crate::dispatch::domain::{DispatchResult, ProcessInvocation};
use async_trait::async_trait;
use serde_json::Value;

/// One-shot request/response exchange with a child process.
///
/// Implementations write `input` to the child's standard input, close it,
/// read standard output until the child exits, and decode the output as
/// JSON.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessTransport: Send + Sync {
    /// Runs `invocation` with `input` on standard input.
    ///
    /// # Errors
    ///
    /// Returns [`crate::dispatch::domain::DispatchError::ProcessFailed`] with
    /// captured standard error on a nonzero exit, and
    /// [`crate::dispatch::domain::DispatchError::InvalidOutput`] when the
    /// output is not JSON.
    async fn exchange(&self, invocation: &ProcessInvocation, input: &[u8])
    -> DispatchResult<Value>;
}
