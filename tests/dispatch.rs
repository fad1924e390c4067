//! Dispatch integration tests against real transports.
//!
//! Tests are organized into modules by transport:
//! - `subprocess_tests`: `bot`, `local_ai`, and `custom_ai` over child processes
//! - `http_tests`: `api` backends against a local HTTP server
//! - `bulk_tests`: Concurrent fan-out with isolated failures

mod dispatch {
    pub mod helpers;

    #[cfg(unix)]
    mod bulk_tests;
    mod http_tests;
    #[cfg(unix)]
    mod subprocess_tests;
}
