//! Configuration validation
//!
//! - `config_validators`: gateway and provider validators
//! - `rate_limit_validators`: quota validators
//! - `tests`: test suite for all validators

mod config_validators;
mod rate_limit_validators;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
