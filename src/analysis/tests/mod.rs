//! Unit tests for input analysis.
