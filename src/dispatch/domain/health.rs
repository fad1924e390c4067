//! Junction health reporting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Liveness status reported by the junction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// The junction is accepting dispatches.
    Healthy,
}

impl HealthStatus {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Point-in-time liveness and capacity probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    status: HealthStatus,
    active_sessions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    memory_usage_mib: Option<f64>,
}

impl HealthReport {
    /// Creates a `healthy` report.
    #[must_use]
    pub const fn healthy(active_sessions: usize, memory_usage_mib: Option<f64>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            active_sessions,
            memory_usage_mib,
        }
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> HealthStatus {
        self.status
    }

    /// Returns the number of live sessions.
    #[must_use]
    pub const fn active_sessions(&self) -> usize {
        self.active_sessions
    }

    /// Returns the resident memory of the process in MiB, when known.
    #[must_use]
    pub const fn memory_usage_mib(&self) -> Option<f64> {
        self.memory_usage_mib
    }
}
