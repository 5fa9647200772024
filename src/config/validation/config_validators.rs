//! Gateway and provider configuration validators

use super::Validate;
use crate::config::models::*;
use std::collections::HashSet;
use tracing::debug;

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating gateway configuration");

        let mut provider_names = HashSet::new();
        for provider in &self.providers {
            if !provider_names.insert(provider.name.as_str()) {
                return Err(format!("Duplicate provider name: {}", provider.name));
            }
            provider.validate()?;
        }

        self.rate_limit
            .validate()
            .map_err(|e| format!("Default rate limit: {}", e))?;

        debug!("Gateway configuration validation completed");
        Ok(())
    }
}

impl Validate for ProviderConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Provider name cannot be empty".to_string());
        }

        if let Some(rate_limit) = &self.rate_limit {
            rate_limit
                .validate()
                .map_err(|e| format!("Provider {}: {}", self.name, e))?;
        }

        Ok(())
    }
}
