//! Core functionality for the control plane
//!
//! This module contains the admission, telemetry, routing and screening
//! components and the [`Gateway`] that ties them together.

pub mod gateway;
pub mod rate_limiter;
pub mod router;
pub mod security;
pub mod stats;

pub use gateway::Gateway;
pub use stats::{GatewayStats, StatsCollector};
