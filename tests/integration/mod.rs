//! Integration tests for ai-control-plane
//!
//! These tests verify the interaction between multiple components
//! and test real system behavior without mocking.

pub mod concurrency_tests;
pub mod config_tests;
pub mod gateway_tests;
