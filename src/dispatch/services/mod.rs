//! Dispatch services.

pub mod junction;

pub use junction::Junction;
