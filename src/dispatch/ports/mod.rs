//! Transport ports used by the junction.

pub mod http;
pub mod process;

pub use http::HttpTransport;
pub use process::ProcessTransport;

#[cfg(test)]
pub use http::MockHttpTransport;
#[cfg(test)]
pub use process::MockProcessTransport;
