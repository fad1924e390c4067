//! Routing errors.

use crate::backend::{domain::BackendId, services::BackendRegistryServiceError};
use crate::dispatch::domain::DispatchError;
use crate::selection::ports::KeywordModelStoreError;
use thiserror::Error;

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;

/// Errors returned by [`crate::routing::RequestRouter`].
#[derive(Debug, Error)]
pub enum RouteError {
    /// The backend registry failed.
    #[error(transparent)]
    Registry(#[from] BackendRegistryServiceError),

    /// The selector's model store failed.
    #[error(transparent)]
    Selection(#[from] KeywordModelStoreError),

    /// The selected backend is no longer registered.
    #[error("selected backend {0} is not registered")]
    SelectedBackendMissing(BackendId),

    /// The selected backend failed to handle the request.
    #[error("backend {backend_id} failed: {source}")]
    Dispatch {
        /// Backend that was dispatched to.
        backend_id: BackendId,
        /// Dispatch failure.
        source: DispatchError,
    },
}
