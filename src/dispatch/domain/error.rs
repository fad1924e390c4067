//! Dispatch failures.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Coarse failure category, stable for callers and serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchErrorKind {
    /// The backend cannot be dispatched as configured. Never retried.
    Configuration,
    /// The backend could not be reached or ran and failed.
    Transport,
    /// The backend ran but returned something that is not JSON.
    Format,
    /// The dispatch did not finish within the configured timeout.
    Timeout,
}

impl DispatchErrorKind {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Transport => "transport",
            Self::Format => "format",
            Self::Timeout => "timeout",
        }
    }
}

impl fmt::Display for DispatchErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Errors raised while dispatching to one backend.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// A `custom_ai` backend carries neither a command line nor a script.
    #[error("custom backend must have either a command line or a script path")]
    MissingDispatchTarget,

    /// The command line splits into no words.
    #[error("command line is empty")]
    EmptyCommandLine,

    /// The bot script does not exist.
    #[error("bot script not found: {0}")]
    ScriptNotFound(String),

    /// The HTTP endpoint answered with a status other than 200.
    #[error("API request failed with status {status}: {body}")]
    HttpStatus {
        /// Response status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// The HTTP request could not be completed.
    #[error("API request failed: {0}")]
    Http(Arc<dyn std::error::Error + Send + Sync>),

    /// The backend process could not be started.
    #[error("failed to start {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        source: Arc<std::io::Error>,
    },

    /// Exchanging data with the backend process failed.
    #[error("backend process I/O failed: {0}")]
    Io(Arc<std::io::Error>),

    /// The backend process exited unsuccessfully.
    #[error("backend process failed ({}): {stderr}", exit_label(*.exit_code))]
    ProcessFailed {
        /// Exit code, absent when the process was killed by a signal.
        exit_code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },

    /// The backend output is not valid JSON.
    #[error("backend output is not valid JSON: {0}")]
    InvalidOutput(Arc<serde_json::Error>),

    /// The analyzed input could not be encoded.
    #[error("failed to encode dispatch payload: {0}")]
    Encode(Arc<serde_json::Error>),

    /// The dispatch exceeded its time limit.
    #[error("dispatch timed out after {0:?}")]
    TimedOut(Duration),

    /// The dispatch task ended without producing a result.
    #[error("dispatch task aborted: {0}")]
    Aborted(String),
}

fn exit_label(code: Option<i32>) -> String {
    code.map_or_else(|| "terminated by signal".to_owned(), |code| format!("exit code {code}"))
}

impl DispatchError {
    /// Wraps an HTTP client error.
    pub fn http(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Http(Arc::new(err))
    }

    /// Wraps a process start failure.
    pub fn spawn(program: impl Into<String>, err: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source: Arc::new(err),
        }
    }

    /// Wraps a process I/O failure.
    #[must_use]
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }

    /// Wraps a JSON decoding failure of backend output.
    #[must_use]
    pub fn invalid_output(err: serde_json::Error) -> Self {
        Self::InvalidOutput(Arc::new(err))
    }

    /// Wraps a JSON encoding failure of the payload.
    #[must_use]
    pub fn encode(err: serde_json::Error) -> Self {
        Self::Encode(Arc::new(err))
    }

    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> DispatchErrorKind {
        match self {
            Self::MissingDispatchTarget | Self::EmptyCommandLine | Self::ScriptNotFound(_) => {
                DispatchErrorKind::Configuration
            }
            Self::HttpStatus { .. }
            | Self::Http(_)
            | Self::Spawn { .. }
            | Self::Io(_)
            | Self::ProcessFailed { .. }
            | Self::Aborted(_) => DispatchErrorKind::Transport,
            Self::InvalidOutput(_) | Self::Encode(_) => DispatchErrorKind::Format,
            Self::TimedOut(_) => DispatchErrorKind::Timeout,
        }
    }
}
