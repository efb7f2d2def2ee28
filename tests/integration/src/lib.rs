//! Integration test support for the direct-messaging API
//!
//! Provides a test server harness, HTTP helpers, and data fixtures.

pub mod fixtures;
pub mod helpers;

pub use helpers::{assert_json, assert_status, check_test_env, test_config, TestServer};
