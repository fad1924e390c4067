//! Domain model for backend registration.
//!
//! Backend descriptors pair common metadata (name, description) with a closed
//! set of dispatch kinds, each carrying exactly the fields that kind needs.
//! Infrastructure concerns remain outside this boundary.

mod descriptor;
mod error;
mod ids;
mod kind;

pub use descriptor::{BackendDescriptor, BackendUpdate};
pub use error::{BackendDomainError, ParseBackendTypeError};
pub use ids::BackendId;
pub use kind::{ApiTarget, BackendKind, BackendType, CommandTarget, CustomTarget, ScriptTarget};
