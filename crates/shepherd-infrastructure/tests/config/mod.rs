//! Configuration Tests
//!
//! Tests for configuration loading, validation, and the provider adapter.

mod validation_test;
