//! Rate limiting configuration

use serde::{Deserialize, Serialize};

/// Per-provider admission quota
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests allowed in any rolling minute
    #[serde(default = "default_rpm")]
    pub requests_per_minute: u32,
    /// Requests allowed in any rolling hour
    #[serde(default = "default_rph")]
    pub requests_per_hour: u32,
    /// Requests allowed per day.
    ///
    /// Only enforced when [`RateLimiterSettings::enforce_daily_limit`] is set;
    /// with the default 60 minute history this bound is implied by the hourly one.
    #[serde(default = "default_rpd")]
    pub requests_per_day: u32,
    /// Enable rate limiting
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: default_rpm(),
            requests_per_hour: default_rph(),
            requests_per_day: default_rpd(),
            enabled: true,
        }
    }
}

impl RateLimitConfig {
    /// Create an enabled config with explicit limits
    pub fn new(requests_per_minute: u32, requests_per_hour: u32, requests_per_day: u32) -> Self {
        Self {
            requests_per_minute,
            requests_per_hour,
            requests_per_day,
            enabled: true,
        }
    }

    /// Config applied to providers that were never configured: admission is unlimited.
    pub fn unlimited() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Merge rate limit configurations (other takes precedence where it differs from defaults)
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = false;
        }
        if other.requests_per_minute != default_rpm() {
            self.requests_per_minute = other.requests_per_minute;
        }
        if other.requests_per_hour != default_rph() {
            self.requests_per_hour = other.requests_per_hour;
        }
        if other.requests_per_day != default_rpd() {
            self.requests_per_day = other.requests_per_day;
        }
        self
    }
}

/// Behaviour of the rate limiter itself, shared by every provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterSettings {
    /// Keep 24 hours of history and enforce `requests_per_day`.
    ///
    /// Off by default: the limiter keeps one hour of history, so the daily
    /// limit is accepted but never binds on its own. Turning this on changes
    /// observable admission behaviour.
    #[serde(default)]
    pub enforce_daily_limit: bool,
}

fn default_rpm() -> u32 {
    60
}

fn default_rph() -> u32 {
    1000
}

fn default_rpd() -> u32 {
    10000
}

fn default_true() -> bool {
    true
}
