//! Unit tests for request routing.

mod router_tests;
