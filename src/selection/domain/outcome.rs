//! Selection outcome.

use crate::backend::domain::BackendId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of choosing a backend for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "backend_id")]
pub enum Selection {
    /// The highest-scoring candidate.
    Selected(BackendId),
    /// The candidate list was empty.
    NoBackendAvailable,
}

impl Selection {
    /// Returns the selected backend, if any.
    #[must_use]
    pub const fn backend_id(self) -> Option<BackendId> {
        match self {
            Self::Selected(id) => Some(id),
            Self::NoBackendAvailable => None,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selected(id) => write!(f, "selected backend {id}"),
            Self::NoBackendAvailable => f.write_str("no backend available"),
        }
    }
}
