//! Rate Limiting Implementation
//!
//! Per-provider sliding-window admission control with minute, hour and
//! (optionally) day bounds over a rolling request history.

mod limiter;
mod types;


// Re-export public types
pub use limiter::RateLimiter;
pub use types::{RateLimitDenial, RateLimitStatus, RateLimitWindow};
