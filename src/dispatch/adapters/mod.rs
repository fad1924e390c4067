//! Transport adapters for backend dispatch.

pub mod http;
pub mod memory_usage;
pub mod process;

pub use http::ReqwestHttpTransport;
pub use memory_usage::resident_memory_mib;
pub use process::TokioProcessTransport;
