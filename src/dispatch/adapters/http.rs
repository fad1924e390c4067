//! `reqwest`-backed HTTP transport.

use crate::dispatch::{
    domain::{DispatchError, DispatchResult},
    ports::HttpTransport,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

/// HTTP transport sharing one connection pool across dispatches.
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpTransport {
    client: Client,
}

impl ReqwestHttpTransport {
    /// Creates a transport with a default client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport using a preconfigured client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestHttpTransport {
    async fn post_json(
        &self,
        endpoint: &str,
        credential: &str,
        body: &Value,
    ) -> DispatchResult<Value> {
        debug!(endpoint, "posting to backend API");
        let response = self
            .client
            .post(endpoint)
            .bearer_auth(credential)
            .json(body)
            .send()
            .await
            .map_err(DispatchError::http)?;

        let status = response.status();
        if status != StatusCode::OK {
            let text = response.text().await.map_err(DispatchError::http)?;
            warn!(endpoint, status = status.as_u16(), "backend API returned an error");
            return Err(DispatchError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        let bytes = response.bytes().await.map_err(DispatchError::http)?;
        serde_json::from_slice(&bytes).map_err(DispatchError::invalid_output)
    }
}
