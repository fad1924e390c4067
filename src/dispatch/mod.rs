//! Dispatch of analyzed input to registered backends.
//!
//! The [`services::Junction`] owns per-backend session state and turns a
//! backend descriptor plus an analyzed input into a single HTTP call or
//! subprocess exchange. Transports sit behind the ports in [`ports`] so the
//! junction can be exercised without real network or process I/O.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
