//! Request routing: analyze, select, dispatch.
//!
//! [`RequestRouter`] ties the backend registry, the selector, and the
//! junction together behind the two entry points callers need: routing one
//! request to its best backend, and broadcasting it to many.

mod error;
mod outcome;
mod router;

pub use error::{RouteError, RouteResult};
pub use outcome::RouteOutcome;
pub use router::RequestRouter;

#[cfg(test)]
mod tests;
