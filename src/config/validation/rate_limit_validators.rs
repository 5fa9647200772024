//! Rate limit configuration validators

use super::Validate;
use crate::config::models::*;

impl Validate for RateLimitConfig {
    fn validate(&self) -> Result<(), String> {
        // A disabled quota is never consulted, so any numbers are acceptable
        if !self.enabled {
            return Ok(());
        }

        if self.requests_per_minute == 0 {
            return Err("Requests per minute must be greater than 0".to_string());
        }

        if self.requests_per_hour < self.requests_per_minute {
            return Err(format!(
                "Requests per hour ({}) must be at least requests per minute ({})",
                self.requests_per_hour, self.requests_per_minute
            ));
        }

        if self.requests_per_day < self.requests_per_hour {
            return Err(format!(
                "Requests per day ({}) must be at least requests per hour ({})",
                self.requests_per_day, self.requests_per_hour
            ));
        }

        Ok(())
    }
}
