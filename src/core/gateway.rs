//! Gateway facade
//!
//! [`Gateway`] owns one instance of every control-plane component and wires
//! them to a shared [`StatsCollector`]. There are no process-wide singletons;
//! build as many gateways as needed and drop or [`close`](Gateway::close) them.

use crate::config::models::gateway::GatewayConfig;
use crate::config::models::rate_limit::RateLimitConfig;
use crate::config::models::security::SecurityFeatures;
use crate::config::validation::Validate;
use crate::config::Config;
use crate::core::rate_limiter::{RateLimitStatus, RateLimiter};
use crate::core::router::{
    MetricsTracker, ProviderId, ProviderMetrics, Router, RoutingDecision, RoutingRequest,
};
use crate::core::security::{SecurityAssessment, ThreatAssessor, UserContext};
use crate::core::stats::{GatewayStats, StatsCollector};
use crate::utils::error::{GatewayError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Control plane for AI provider traffic
pub struct Gateway {
    config: GatewayConfig,
    rate_limiter: Arc<RateLimiter>,
    metrics: Arc<MetricsTracker>,
    router: Router,
    assessor: ThreatAssessor,
    stats: Arc<StatsCollector>,
}

impl Gateway {
    /// Create a new gateway, installing one rate limit per configured provider
    pub fn new(config: GatewayConfig) -> Result<Self> {
        info!(
            "Initializing gateway with {} configured providers",
            config.providers.len()
        );

        config
            .validate()
            .map_err(|e| GatewayError::Config(format!("Gateway config error: {}", e)))?;

        let stats = Arc::new(StatsCollector::new());

        debug!("Initializing rate limiter");
        let rate_limiter = Arc::new(RateLimiter::new(config.rate_limiter.clone(), stats.clone()));
        for provider in &config.providers {
            rate_limiter.configure_rate_limit(
                &provider.name,
                provider.effective_rate_limit(&config.rate_limit),
            );
        }

        debug!("Initializing router");
        let metrics = Arc::new(MetricsTracker::new());
        let router = Router::new(rate_limiter.clone(), metrics.clone(), stats.clone());

        debug!("Initializing threat assessor");
        let assessor = ThreatAssessor::new(config.security, stats.clone());

        info!("Gateway initialized successfully");
        Ok(Self {
            config,
            rate_limiter,
            metrics,
            router,
            assessor,
            stats,
        })
    }

    /// Create a gateway from a loaded [`Config`]
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.gateway.clone())
    }

    /// Configuration the gateway was built from
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.rate_limiter
    }

    pub fn metrics(&self) -> &Arc<MetricsTracker> {
        &self.metrics
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn assessor(&self) -> &ThreatAssessor {
        &self.assessor
    }

    /// Install or replace a provider's rate limit at runtime
    pub fn configure_rate_limit(&self, provider_id: &str, config: RateLimitConfig) {
        self.rate_limiter.configure_rate_limit(provider_id, config);
    }

    pub fn check_rate_limit(&self, provider_id: &str, user_id: Option<&str>) -> bool {
        self.rate_limiter.check_rate_limit(provider_id, user_id)
    }

    pub fn record_request(&self, provider_id: &str, user_id: Option<&str>) {
        self.rate_limiter.record_request(provider_id, user_id);
    }

    /// Atomic check-and-record
    pub fn try_admit(&self, provider_id: &str, user_id: Option<&str>) -> bool {
        self.rate_limiter.try_admit(provider_id, user_id)
    }

    pub fn rate_limit_status(&self, provider_id: &str) -> RateLimitStatus {
        self.rate_limiter.rate_limit_status(provider_id)
    }

    /// Report a completed provider call
    pub fn update_provider_metrics(
        &self,
        provider_id: &str,
        response_time_ms: f64,
        success: bool,
        cost: f64,
    ) {
        self.metrics
            .update_provider_metrics(provider_id, response_time_ms, success, cost);
    }

    pub fn get_provider_metrics(&self, provider_id: &str) -> ProviderMetrics {
        self.metrics.get_provider_metrics(provider_id)
    }

    pub fn get_all_provider_metrics(&self) -> HashMap<String, ProviderMetrics> {
        self.metrics.get_all_provider_metrics()
    }

    pub fn calculate_provider_score(&self, provider_id: &str, request: &RoutingRequest) -> f64 {
        self.router
            .scorer()
            .calculate_provider_score(provider_id, request)
    }

    pub fn select_optimal_provider(
        &self,
        request: &RoutingRequest,
        candidate_providers: &[ProviderId],
    ) -> RoutingDecision {
        self.router
            .select_optimal_provider(request, candidate_providers)
    }

    pub fn get_cheapest_provider(&self, providers: &[ProviderId]) -> Option<ProviderId> {
        self.router.get_cheapest_provider(providers)
    }

    pub fn get_fastest_provider(&self, providers: &[ProviderId]) -> Option<ProviderId> {
        self.router.get_fastest_provider(providers)
    }

    pub fn assess_request_security(
        &self,
        content: &str,
        user_context: &UserContext,
    ) -> SecurityAssessment {
        self.assessor.assess_request_security(content, user_context)
    }

    pub fn assess_enhanced_security(
        &self,
        content: &str,
        user_context: &UserContext,
    ) -> SecurityAssessment {
        self.assessor.assess_enhanced_security(content, user_context)
    }

    /// Replace the threat detection toggles at runtime
    pub fn update_security_features(&self, features: SecurityFeatures) {
        self.assessor.update_features(features);
    }

    pub fn get_gateway_stats(&self) -> GatewayStats {
        self.stats.snapshot()
    }

    /// Clear all provider metrics and zero the stats as one step.
    ///
    /// Both locks are held together, metrics first, so no reader sees one
    /// cleared without the other. Rate limit history is left alone.
    pub fn reset_metrics(&self) {
        let mut metrics = self.metrics.write();
        let mut stats = self.stats.lock();
        metrics.clear();
        *stats = GatewayStats::default();
        drop(stats);
        drop(metrics);

        info!("Gateway metrics reset");
    }

    /// Stats counters and per-provider gauges in Prometheus text format
    pub fn export_prometheus(&self) -> String {
        let mut output = self.stats.snapshot().export_prometheus();
        output.push_str(&self.metrics.export_prometheus());
        output
    }

    /// Shut the gateway down and return its final stats
    pub fn close(self) -> GatewayStats {
        let stats = self.stats.snapshot();
        info!(
            "Closing gateway: {} requests, {} blocked, {} rate limited",
            stats.total_requests, stats.blocked_requests, stats.rate_limited_requests
        );
        stats
    }
}
