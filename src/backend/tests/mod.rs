//! Unit tests for the backend registry module.
