//! Shared utilities: error types and logging setup

pub mod error;
pub mod logging;

pub use error::{GatewayError, Result};
pub use logging::{LogFormat, LogLevel, init_logging};
