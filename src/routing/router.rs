//! The request router service.

use crate::analysis::{
    domain::{AnalyzedInput, InputKind},
    services::InputAnalyzer,
};
use crate::backend::{
    domain::{BackendId, BackendType},
    ports::BackendRegistryRepository,
    services::BackendRegistryService,
};
use crate::dispatch::{
    domain::BulkDispatchEntry,
    ports::{HttpTransport, ProcessTransport},
    services::Junction,
};
use crate::routing::{RouteError, RouteOutcome, RouteResult};
use crate::selection::{domain::Selection, ports::KeywordModelStore, services::BackendSelector};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Routes raw requests to registered backends.
pub struct RequestRouter<R, S, H, P, C>
where
    R: BackendRegistryRepository,
    S: KeywordModelStore,
    H: HttpTransport,
    P: ProcessTransport,
    C: Clock + Send + Sync,
{
    analyzer: InputAnalyzer,
    registry: Arc<BackendRegistryService<R, C>>,
    selector: Arc<BackendSelector<S>>,
    junction: Junction<H, P, C>,
}

impl<R, S, H, P, C> RequestRouter<R, S, H, P, C>
where
    R: BackendRegistryRepository,
    S: KeywordModelStore,
    H: HttpTransport + 'static,
    P: ProcessTransport + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a router over the given collaborators.
    #[must_use]
    pub const fn new(
        registry: Arc<BackendRegistryService<R, C>>,
        selector: Arc<BackendSelector<S>>,
        junction: Junction<H, P, C>,
    ) -> Self {
        Self {
            analyzer: InputAnalyzer::new(),
            registry,
            selector,
            junction,
        }
    }

    /// Returns the junction used for dispatch.
    #[must_use]
    pub const fn junction(&self) -> &Junction<H, P, C> {
        &self.junction
    }

    /// Analyzes `text` without dispatching it.
    #[must_use]
    pub fn analyze(&self, text: &str, kind: InputKind) -> AnalyzedInput {
        self.analyzer.analyze(text, kind)
    }

    /// Routes one request to the best-scoring registered backend.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Registry`] when backends cannot be listed,
    /// [`RouteError::SelectedBackendMissing`] when the chosen backend vanished
    /// before dispatch, and [`RouteError::Dispatch`] when the backend fails.
    pub async fn route(&self, text: &str, kind: InputKind) -> RouteResult<RouteOutcome> {
        let input = self.analyze(text, kind);
        let candidates = self.registry.list_all().await?;

        let Selection::Selected(backend_id) = self.selector.select_best(&input, &candidates)
        else {
            info!("no backend available for request");
            return Ok(RouteOutcome::NoBackendAvailable);
        };

        let backend = self
            .registry
            .find_by_id(backend_id)
            .await?
            .ok_or(RouteError::SelectedBackendMissing(backend_id))?;
        let result = self
            .junction
            .process(&backend, &input)
            .await
            .map_err(|source| RouteError::Dispatch { backend_id, source })?;

        info!(%backend_id, intent = %input.intent(), "routed request");
        Ok(RouteOutcome::Dispatched { backend_id, result })
    }

    /// Dispatches one request to every registered backend, optionally only
    /// those of `backend_type`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Registry`] when backends cannot be listed.
    /// Individual dispatch failures are reported per entry.
    pub async fn broadcast(
        &self,
        text: &str,
        kind: InputKind,
        backend_type: Option<BackendType>,
    ) -> RouteResult<Vec<BulkDispatchEntry>> {
        let input = self.analyze(text, kind);
        let backends = match backend_type {
            Some(filter) => self.registry.list_by_type(filter).await?,
            None => self.registry.list_all().await?,
        };
        Ok(self.junction.bulk_process(&backends, &input).await)
    }

    /// Unregisters a backend, forgets its learned keywords, and closes its
    /// session. Returns `false` when no backend has the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Registry`] or [`RouteError::Selection`] when
    /// persistence fails.
    pub async fn retire_backend(&self, backend_id: BackendId) -> RouteResult<bool> {
        if !self.registry.delete(backend_id).await? {
            return Ok(false);
        }
        self.selector.forget(backend_id).await?;
        self.junction.remove_session(backend_id);
        Ok(true)
    }
}
