//! Main gateway configuration

use super::*;
use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GatewayConfig {
    /// Providers to install rate limits for at construction
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
    /// Quota used for providers without their own `rate_limit`
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Limiter-wide behaviour
    #[serde(default)]
    pub rate_limiter: RateLimiterSettings,
    /// Threat detection toggles
    #[serde(default)]
    pub security: SecurityFeatures,
}

impl GatewayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Recognised keys: `GATEWAY_PROVIDERS` (comma separated),
    /// `GATEWAY_RATE_LIMIT_RPM`, `GATEWAY_RATE_LIMIT_RPH`, `GATEWAY_RATE_LIMIT_RPD`,
    /// `GATEWAY_RATE_LIMIT_ENABLED`, `GATEWAY_ENFORCE_DAILY_LIMIT`,
    /// `GATEWAY_THREAT_DETECTION`, `GATEWAY_CONTENT_FILTERING`,
    /// `GATEWAY_PII_DETECTION`, `GATEWAY_MALICIOUS_PROMPT_DETECTION`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(providers) = lookup("GATEWAY_PROVIDERS") {
            config.providers = providers
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(ProviderConfig::new)
                .collect();
        }

        if let Some(rpm) = parse_var(&lookup, "GATEWAY_RATE_LIMIT_RPM")? {
            config.rate_limit.requests_per_minute = rpm;
        }
        if let Some(rph) = parse_var(&lookup, "GATEWAY_RATE_LIMIT_RPH")? {
            config.rate_limit.requests_per_hour = rph;
        }
        if let Some(rpd) = parse_var(&lookup, "GATEWAY_RATE_LIMIT_RPD")? {
            config.rate_limit.requests_per_day = rpd;
        }
        if let Some(enabled) = parse_var(&lookup, "GATEWAY_RATE_LIMIT_ENABLED")? {
            config.rate_limit.enabled = enabled;
        }
        if let Some(daily) = parse_var(&lookup, "GATEWAY_ENFORCE_DAILY_LIMIT")? {
            config.rate_limiter.enforce_daily_limit = daily;
        }

        if let Some(flag) = parse_var(&lookup, "GATEWAY_THREAT_DETECTION")? {
            config.security.threat_detection = flag;
        }
        if let Some(flag) = parse_var(&lookup, "GATEWAY_CONTENT_FILTERING")? {
            config.security.content_filtering = flag;
        }
        if let Some(flag) = parse_var(&lookup, "GATEWAY_PII_DETECTION")? {
            config.security.pii_detection = flag;
        }
        if let Some(flag) = parse_var(&lookup, "GATEWAY_MALICIOUS_PROMPT_DETECTION")? {
            config.security.malicious_prompt_detection = flag;
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        // Providers with the same name are replaced; new ones are appended in order
        let mut index: HashMap<String, usize> = self
            .providers
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), i))
            .collect();

        for provider in other.providers {
            match index.get(&provider.name) {
                Some(&i) => self.providers[i] = provider,
                None => {
                    index.insert(provider.name.clone(), self.providers.len());
                    self.providers.push(provider);
                }
            }
        }

        self.rate_limit = self.rate_limit.merge(other.rate_limit);
        if other.rate_limiter.enforce_daily_limit {
            self.rate_limiter.enforce_daily_limit = true;
        }
        if other.security != SecurityFeatures::default() {
            self.security = other.security;
        }

        self
    }

    /// Quota to install for a named provider
    pub fn rate_limit_for(&self, provider_id: &str) -> RateLimitConfig {
        self.providers
            .iter()
            .find(|p| p.name == provider_id)
            .map(|p| p.effective_rate_limit(&self.rate_limit))
            .unwrap_or_else(|| self.rate_limit.clone())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| GatewayError::config(format!("Invalid value for {}: {}", key, e))),
        None => Ok(None),
    }
}
