//! Routing outcomes.

use crate::backend::domain::BackendId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of routing one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RouteOutcome {
    /// The request was handled by the selected backend.
    Dispatched {
        /// Backend that handled the request.
        backend_id: BackendId,
        /// The backend's JSON response.
        result: Value,
    },
    /// No backend is registered.
    NoBackendAvailable,
}

impl RouteOutcome {
    /// Returns the handling backend, if any.
    #[must_use]
    pub const fn backend_id(&self) -> Option<BackendId> {
        match self {
            Self::Dispatched { backend_id, .. } => Some(*backend_id),
            Self::NoBackendAvailable => None,
        }
    }
}
