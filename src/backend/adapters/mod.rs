//! Adapter implementations for backend registry ports.

pub mod json_file;
pub mod memory;
