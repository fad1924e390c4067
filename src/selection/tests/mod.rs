//! Unit tests for backend selection.
