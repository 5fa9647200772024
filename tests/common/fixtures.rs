//! Test fixtures and data factories
//!
//! All factories create real objects, not mocks.

use ai_control_plane::config::{GatewayConfig, ProviderConfig, RateLimitConfig};
use ai_control_plane::{Gateway, ProviderId, RoutingRequest, TaskKind};

/// Factory for creating gateways
pub struct GatewayFactory;

impl GatewayFactory {
    /// Gateway with three providers on default quotas
    pub fn create() -> Gateway {
        Gateway::new(Self::config()).unwrap()
    }

    /// Gateway whose providers all share a per-minute quota
    pub fn with_minute_limit(requests_per_minute: u32) -> Gateway {
        let mut config = Self::config();
        for provider in &mut config.providers {
            provider.rate_limit = Some(RateLimitConfig::new(
                requests_per_minute,
                requests_per_minute * 60,
                requests_per_minute * 60 * 24,
            ));
        }
        Gateway::new(config).unwrap()
    }

    /// Config with gemini, openai and claude
    pub fn config() -> GatewayConfig {
        GatewayConfig {
            providers: Self::providers()
                .into_iter()
                .map(ProviderConfig::new)
                .collect(),
            ..Default::default()
        }
    }

    /// Candidate list matching [`GatewayFactory::config`]
    pub fn providers() -> Vec<ProviderId> {
        vec!["gemini".to_string(), "openai".to_string(), "claude".to_string()]
    }
}

/// Factory for creating routing requests
pub struct RequestFactory;

impl RequestFactory {
    /// Plain chat request from a known user
    pub fn chat(content: &str) -> RoutingRequest {
        RoutingRequest::new(content, TaskKind::Chat).with_user("test-user")
    }

    /// Anonymous request for a given task
    pub fn task(content: &str, task: TaskKind) -> RoutingRequest {
        RoutingRequest::new(content, task)
    }
}
