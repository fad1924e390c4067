//! Unit tests for backend dispatch.
