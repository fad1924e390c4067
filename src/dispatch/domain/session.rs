//! Per-backend session bookkeeping.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Session status. Sessions only exist while connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// The backend has been used and the session is live.
    Connected,
}

impl SessionStatus {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "connected",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Liveness and last-use record for one backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    status: SessionStatus,
    last_used: DateTime<Utc>,
}

impl SessionState {
    /// Opens a connected session used at `now`.
    #[must_use]
    pub const fn connected(now: DateTime<Utc>) -> Self {
        Self {
            status: SessionStatus::Connected,
            last_used: now,
        }
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns when the session was last used.
    #[must_use]
    pub const fn last_used(&self) -> DateTime<Utc> {
        self.last_used
    }

    /// Records a use at `now`.
    pub const fn touch(&mut self, now: DateTime<Utc>) {
        self.last_used = now;
    }

    /// Returns `true` when the session has been idle for strictly longer
    /// than `max_idle` at `now`.
    #[must_use]
    pub fn is_idle_longer_than(&self, now: DateTime<Utc>, max_idle: Duration) -> bool {
        TimeDelta::from_std(max_idle)
            .is_ok_and(|limit| now.signed_duration_since(self.last_used) > limit)
    }
}
