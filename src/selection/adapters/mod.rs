//! Adapter implementations for keyword model persistence.

pub mod json_file;
pub mod memory;
