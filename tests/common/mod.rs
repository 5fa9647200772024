//! Common test utilities for ai-control-plane
//!
//! - Gateway and request fixtures
//! - Custom assertions

pub mod assertions;
pub mod fixtures;

pub use fixtures::{GatewayFactory, RequestFactory};
