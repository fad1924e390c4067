//! Port contracts for keyword model persistence.

pub mod store;

pub use store::{KeywordModelStore, KeywordModelStoreError, KeywordModelStoreResult};
