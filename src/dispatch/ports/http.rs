//! Outbound HTTP transport port.

use crate::dispatch::domain::DispatchResult;
use async_trait::async_trait;
use serde_json::Value;

/// JSON-over-HTTP request channel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Posts `body` as JSON to `endpoint` with a bearer `credential`.
    ///
    /// Succeeds only on status 200 with a JSON body, which is returned
    /// unmodified.
    ///
    /// # Errors
    ///
    /// Returns [`crate::dispatch::domain::DispatchError::HttpStatus`] with
    /// the response body for any other status, and
    /// [`crate::dispatch::domain::DispatchError::InvalidOutput`] when the
    /// body is not JSON.
    async fn post_json(
        &self,
        endpoint: &str,
        credential: &str,
        body: &Value,
    ) -> DispatchResult<Value>;
}
