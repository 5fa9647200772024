//! Provider scoring
//!
//! Collapses a provider's telemetry into one comparable number in [0, 1].

use super::metrics::{MetricsTracker, ProviderMetrics};
use super::types::RoutingRequest;
use std::sync::Arc;

/// Score given to providers with no telemetry, so they still get traffic
pub const NEUTRAL_SCORE: f64 = 0.5;
/// Latency at which the speed sub-score reaches zero
pub const WORST_RESPONSE_TIME_MS: f64 = 5000.0;
/// Cost at which the cost sub-score reaches zero
pub const WORST_COST_PER_REQUEST: f64 = 0.10;

const SUCCESS_WEIGHT: f64 = 0.4;
const SPEED_WEIGHT: f64 = 0.3;
const COST_WEIGHT: f64 = 0.3;

/// Weighted blend of reliability, speed and cost
#[derive(Debug, Clone)]
pub struct ProviderScorer {
    metrics: Arc<MetricsTracker>,
}

impl ProviderScorer {
    pub fn new(metrics: Arc<MetricsTracker>) -> Self {
        Self { metrics }
    }

    /// Score a provider for a request. Has no side effects.
    pub fn calculate_provider_score(&self, provider_id: &str, _request: &RoutingRequest) -> f64 {
        match self.metrics.find(provider_id) {
            Some(metrics) => score_metrics(&metrics),
            None => NEUTRAL_SCORE,
        }
    }
}

/// Score a metrics snapshot
pub fn score_metrics(metrics: &ProviderMetrics) -> f64 {
    let speed_score = (1.0 - metrics.average_response_time_ms / WORST_RESPONSE_TIME_MS).max(0.0);
    let cost_score = (1.0 - metrics.cost_per_request / WORST_COST_PER_REQUEST).max(0.0);

    let score = SUCCESS_WEIGHT * metrics.success_rate
        + SPEED_WEIGHT * speed_score
        + COST_WEIGHT * cost_score;

    // clamp passes NaN through
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}
