//! Backend registration and lookup for Switchyard.
//!
//! A backend is a registered AI execution target: a remote HTTP API, a local
//! script, or a local command-line model. The module follows hexagonal
//! architecture:
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
