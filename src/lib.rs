//! Switchyard: routes user input to registered AI backends.
//!
//! A request is analyzed into intent, entities, and sentiment, scored against
//! a keyword model learned from labelled examples, and dispatched to the
//! best-matching backend over HTTP or a subprocess pipe.
//!
//! # Architecture
//!
//! Switchyard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and transports
//! - **Adapters**: Concrete implementations of ports (JSON files, HTTP,
//!   child processes)
//!
//! # Modules
//!
//! - [`backend`]: Backend registration and lookup
//! - [`analysis`]: Input cleaning, intent, entities, and sentiment
//! - [`selection`]: Keyword-frequency backend selection
//! - [`dispatch`]: Session tracking and per-kind dispatch
//! - [`routing`]: End-to-end request routing

pub mod analysis;
pub mod backend;
pub mod dispatch;
pub mod routing;
pub mod selection;
