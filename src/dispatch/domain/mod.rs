//! Domain types for backend dispatch.

mod config;
mod error;
mod health;
mod invocation;
mod outcome;
mod session;

pub use config::DispatchConfig;
pub use error::{DispatchError, DispatchErrorKind, DispatchResult};
pub use health::{HealthReport, HealthStatus};
pub use invocation::ProcessInvocation;
pub use outcome::{BulkDispatchEntry, DispatchFailure, DispatchOutcome};
pub use session::{SessionState, SessionStatus};
