//! Keyword-frequency backend selection for Switchyard.
//!
//! The selector learns, per backend, how often each keyword appeared in
//! requests routed to it, and picks the candidate whose learned counts best
//! match a new request. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
