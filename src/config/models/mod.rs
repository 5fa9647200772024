//! Configuration data models
//!
//! This module defines all configuration structures used by the control plane.

pub mod gateway;
pub mod provider;
pub mod rate_limit;
pub mod security;

// Re-export all configuration types
pub use gateway::*;
pub use provider::*;
pub use rate_limit::*;
pub use security::*;
