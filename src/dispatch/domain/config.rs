//! Dispatch configuration.

use std::time::Duration;

/// Tunables for the junction.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use switchyard::dispatch::domain::DispatchConfig;
///
/// let config = DispatchConfig::default();
/// assert_eq!(config.dispatch_timeout, Some(Duration::from_secs(120)));
///
/// let unbounded = DispatchConfig::unbounded();
/// assert!(unbounded.dispatch_timeout.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Upper bound on a single dispatch; `None` waits indefinitely.
    pub dispatch_timeout: Option<Duration>,
    /// Program used to run `bot` scripts.
    pub script_interpreter: String,
    /// Idle time after which a session is considered inactive.
    pub session_idle_timeout: Duration,
}

impl DispatchConfig {
    /// Default per-dispatch timeout.
    pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(120);

    /// Default idle threshold for session cleanup.
    pub const DEFAULT_SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(3600);

    /// Default script interpreter.
    pub const DEFAULT_SCRIPT_INTERPRETER: &'static str = "python3";

    /// Creates a configuration with no dispatch timeout.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            dispatch_timeout: None,
            ..Default::default()
        }
    }

    /// Sets the per-dispatch timeout. `None` or a zero duration disables it.
    #[must_use]
    pub fn with_dispatch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.dispatch_timeout = timeout.filter(|limit| !limit.is_zero());
        self
    }

    /// Sets the program used to run `bot` scripts.
    #[must_use]
    pub fn with_script_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.script_interpreter = interpreter.into();
        self
    }

    /// Sets the idle threshold used by session cleanup.
    #[must_use]
    pub const fn with_session_idle_timeout(mut self, idle: Duration) -> Self {
        self.session_idle_timeout = idle;
        self
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            dispatch_timeout: Some(Self::DEFAULT_DISPATCH_TIMEOUT),
            script_interpreter: Self::DEFAULT_SCRIPT_INTERPRETER.to_owned(),
            session_idle_timeout: Self::DEFAULT_SESSION_IDLE_TIMEOUT,
        }
    }
}
