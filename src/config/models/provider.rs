//! Provider configuration

use super::rate_limit::RateLimitConfig;
use serde::{Deserialize, Serialize};

/// A backend known to the gateway at construction time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider key, e.g. "gemini"
    pub name: String,
    /// Provider-specific quota; the gateway-wide default applies when absent
    #[serde(default)]
    pub rate_limit: Option<RateLimitConfig>,
}

impl ProviderConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rate_limit: None,
        }
    }

    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    /// Quota to install for this provider
    pub fn effective_rate_limit(&self, default: &RateLimitConfig) -> RateLimitConfig {
        self.rate_limit.clone().unwrap_or_else(|| default.clone())
    }
}
