//! The junction: session bookkeeping plus per-kind dispatch.

use crate::analysis::domain::AnalyzedInput;
use crate::backend::domain::{BackendDescriptor, BackendId, BackendKind};
use crate::dispatch::{
    adapters::resident_memory_mib,
    domain::{
        BulkDispatchEntry, DispatchConfig, DispatchError, DispatchOutcome, DispatchResult,
        HealthReport, ProcessInvocation, SessionState,
    },
    ports::{HttpTransport, ProcessTransport},
};
use mockable::Clock;
use serde_json::Value;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, error, info};

type SessionMap = HashMap<BackendId, SessionState>;

/// Routes analyzed input to backends and tracks per-backend sessions.
///
/// The session map is the only shared mutable state. It is held behind a
/// mutex that is never held across an await point, so session operations
/// complete without blocking on dispatch I/O.
pub struct Junction<H, P, C>
where
    H: HttpTransport,
    P: ProcessTransport,
    C: Clock + Send + Sync,
{
    http: Arc<H>,
    process: Arc<P>,
    clock: Arc<C>,
    config: Arc<DispatchConfig>,
    sessions: Arc<Mutex<SessionMap>>,
}

impl<H, P, C> Clone for Junction<H, P, C>
where
    H: HttpTransport,
    P: ProcessTransport,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            process: Arc::clone(&self.process),
            clock: Arc::clone(&self.clock),
            config: Arc::clone(&self.config),
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<H, P, C> Junction<H, P, C>
where
    H: HttpTransport,
    P: ProcessTransport,
    C: Clock + Send + Sync,
{
    /// Creates a junction with no sessions.
    #[must_use]
    pub fn new(http: Arc<H>, process: Arc<P>, clock: Arc<C>, config: DispatchConfig) -> Self {
        Self {
            http,
            process,
            clock,
            config: Arc::new(config),
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Returns the clock used to stamp sessions.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn sessions(&self) -> MutexGuard<'_, SessionMap> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens a session for `backend_id` if none exists.
    ///
    /// Returns `true` when a session was created. An existing session is left
    /// untouched, including its last-use time.
    pub fn ensure_session(&self, backend_id: BackendId) -> bool {
        let mut sessions = self.sessions();
        if sessions.contains_key(&backend_id) {
            return false;
        }
        sessions.insert(backend_id, SessionState::connected(self.clock.utc()));
        info!(%backend_id, "created session");
        true
    }

    /// Closes the session for `backend_id`, returning whether one existed.
    pub fn remove_session(&self, backend_id: BackendId) -> bool {
        let removed = self.sessions().remove(&backend_id).is_some();
        if removed {
            info!(%backend_id, "removed session");
        }
        removed
    }

    /// Returns a copy of the session for `backend_id`.
    #[must_use]
    pub fn session(&self, backend_id: BackendId) -> Option<SessionState> {
        self.sessions().get(&backend_id).copied()
    }

    /// Returns the number of live sessions.
    #[must_use]
    pub fn active_session_count(&self) -> usize {
        self.sessions().len()
    }

    fn touch_session(&self, backend_id: BackendId) {
        let now = self.clock.utc();
        match self.sessions().entry(backend_id) {
            Entry::Occupied(mut occupied) => occupied.get_mut().touch(now),
            Entry::Vacant(vacant) => {
                vacant.insert(SessionState::connected(now));
                info!(%backend_id, "created session");
            }
        }
    }

    /// Dispatches `input` to one backend and returns its JSON response.
    ///
    /// The backend's session is created if needed and stamped as used before
    /// the attempt; the stamp is kept even when the dispatch fails.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] describing the first failure; see
    /// [`DispatchError::kind`] for the category.
    pub async fn process(
        &self,
        backend: &BackendDescriptor,
        input: &AnalyzedInput,
    ) -> DispatchResult<Value> {
        let backend_id = backend.id();
        self.touch_session(backend_id);

        let result = self.bounded(self.dispatch(backend.kind(), input)).await;
        match &result {
            Ok(_) => debug!(%backend_id, "dispatch succeeded"),
            Err(err) => error!(%backend_id, kind = %err.kind(), error = %err, "dispatch failed"),
        }
        result
    }

    async fn bounded(
        &self,
        dispatch: impl Future<Output = DispatchResult<Value>>,
    ) -> DispatchResult<Value> {
        let Some(limit) = self.config.dispatch_timeout else {
            return dispatch.await;
        };
        tokio::time::timeout(limit, dispatch)
            .await
            .unwrap_or(Err(DispatchError::TimedOut(limit)))
    }

    async fn dispatch(&self, kind: &BackendKind, input: &AnalyzedInput) -> DispatchResult<Value> {
        match kind {
            BackendKind::Api(target) => {
                let body = serde_json::to_value(input).map_err(DispatchError::encode)?;
                self.http
                    .post_json(target.endpoint(), target.credential(), &body)
                    .await
            }
            BackendKind::Bot(target) => self.run_script(target.script_path(), input).await,
            BackendKind::LocalAi(target) => self.run_command(target.command_line(), input).await,
            BackendKind::CustomAi(target) => {
                match (target.command_line(), target.script_path()) {
                    (Some(command_line), _) => self.run_command(command_line, input).await,
                    (None, Some(script_path)) => self.run_script(script_path, input).await,
                    (None, None) => Err(DispatchError::MissingDispatchTarget),
                }
            }
        }
    }

    async fn run_command(&self, command_line: &str, input: &AnalyzedInput) -> DispatchResult<Value> {
        let invocation = ProcessInvocation::from_command_line(command_line)?;
        self.exchange(&invocation, input).await
    }

    async fn run_script(&self, script_path: &str, input: &AnalyzedInput) -> DispatchResult<Value> {
        let exists = tokio::fs::try_exists(script_path)
            .await
            .map_err(DispatchError::io)?;
        if !exists {
            return Err(DispatchError::ScriptNotFound(script_path.to_owned()));
        }
        let invocation = ProcessInvocation::for_script(&self.config.script_interpreter, script_path);
        self.exchange(&invocation, input).await
    }

    async fn exchange(
        &self,
        invocation: &ProcessInvocation,
        input: &AnalyzedInput,
    ) -> DispatchResult<Value> {
        let payload = serde_json::to_vec(input).map_err(DispatchError::encode)?;
        self.process.exchange(invocation, &payload).await
    }

    /// Removes every session idle for strictly longer than `max_idle` and
    /// returns how many were removed.
    pub fn cleanup_inactive(&self, max_idle: Duration) -> usize {
        let now = self.clock.utc();
        let mut sessions = self.sessions();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle_longer_than(now, max_idle));
        let removed = before - sessions.len();
        info!(removed, "cleaned up inactive sessions");
        removed
    }

    /// Removes sessions idle for longer than the configured idle timeout.
    pub fn cleanup_idle_sessions(&self) -> usize {
        self.cleanup_inactive(self.config.session_idle_timeout)
    }

    /// Reports liveness, session count, and resident memory.
    #[must_use]
    pub fn health_check(&self) -> HealthReport {
        HealthReport::healthy(self.active_session_count(), resident_memory_mib())
    }

    /// Closes every session and returns how many were closed.
    ///
    /// Safe to call more than once.
    pub fn graceful_shutdown(&self) -> usize {
        let closed = {
            let mut sessions = self.sessions();
            let closed = sessions.len();
            sessions.clear();
            closed
        };
        info!(closed, "closed all sessions");
        closed
    }
}

impl<H, P, C> Junction<H, P, C>
where
    H: HttpTransport + 'static,
    P: ProcessTransport + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Dispatches `input` to every backend concurrently.
    ///
    /// Returns one entry per backend in input order. A failing backend
    /// produces an error entry and never affects its siblings.
    pub async fn bulk_process(
        &self,
        backends: &[BackendDescriptor],
        input: &AnalyzedInput,
    ) -> Vec<BulkDispatchEntry> {
        let shared_input = Arc::new(input.clone());
        let handles: Vec<_> = backends
            .iter()
            .map(|backend| {
                let junction = self.clone();
                let backend = backend.clone();
                let input = Arc::clone(&shared_input);
                tokio::spawn(async move { junction.process(&backend, &input).await })
            })
            .collect();

        let mut entries = Vec::with_capacity(handles.len());
        for (backend, handle) in backends.iter().zip(handles) {
            let result = handle
                .await
                .unwrap_or_else(|join_error| Err(DispatchError::Aborted(join_error.to_string())));
            entries.push(BulkDispatchEntry::new(
                backend.id(),
                DispatchOutcome::from(result),
            ));
        }
        info!(backends = backends.len(), "completed bulk dispatch");
        entries
    }
}
