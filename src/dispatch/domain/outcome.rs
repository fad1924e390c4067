//! Per-backend results of a bulk dispatch.

use super::{DispatchError, DispatchErrorKind};
use crate::backend::domain::BackendId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Serializable summary of a failed dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchFailure {
    kind: DispatchErrorKind,
    message: String,
}

impl DispatchFailure {
    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> DispatchErrorKind {
        self.kind
    }

    /// Returns the rendered error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&DispatchError> for DispatchFailure {
    fn from(err: &DispatchError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Payload or failure for one backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DispatchOutcome {
    /// The backend's JSON response.
    #[serde(rename = "result")]
    Success(Value),
    /// Why the backend failed.
    #[serde(rename = "error")]
    Failure(DispatchFailure),
}

impl From<Result<Value, DispatchError>> for DispatchOutcome {
    fn from(result: Result<Value, DispatchError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(err) => Self::Failure(DispatchFailure::from(&err)),
        }
    }
}

/// One bulk dispatch result, tagged with its backend.
///
/// Serializes as `{"backend_id": ..., "result": ...}` or
/// `{"backend_id": ..., "error": {"kind": ..., "message": ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkDispatchEntry {
    backend_id: BackendId,
    #[serde(flatten)]
    outcome: DispatchOutcome,
}

impl BulkDispatchEntry {
    /// Creates an entry.
    #[must_use]
    pub const fn new(backend_id: BackendId, outcome: DispatchOutcome) -> Self {
        Self {
            backend_id,
            outcome,
        }
    }

    /// Returns the backend this entry belongs to.
    #[must_use]
    pub const fn backend_id(&self) -> BackendId {
        self.backend_id
    }

    /// Returns the outcome.
    #[must_use]
    pub const fn outcome(&self) -> &DispatchOutcome {
        &self.outcome
    }

    /// Returns the payload when the dispatch succeeded.
    #[must_use]
    pub const fn result(&self) -> Option<&Value> {
        match &self.outcome {
            DispatchOutcome::Success(value) => Some(value),
            DispatchOutcome::Failure(_) => None,
        }
    }

    /// Returns the failure when the dispatch failed.
    #[must_use]
    pub const fn failure(&self) -> Option<&DispatchFailure> {
        match &self.outcome {
            DispatchOutcome::Success(_) => None,
            DispatchOutcome::Failure(failure) => Some(failure),
        }
    }
}
