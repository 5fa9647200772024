//! Provider selection
//!
//! Filters candidates through the rate limiter, ranks the survivors by score
//! and reports the winner. Selecting a provider does not record admission;
//! callers record once they actually dispatch.

use super::metrics::MetricsTracker;
use super::scorer::ProviderScorer;
use super::types::{ProviderId, RoutingDecision, RoutingRequest};
use crate::core::rate_limiter::RateLimiter;
use crate::core::stats::StatsCollector;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Performance-based router over a caller-supplied candidate set
pub struct Router {
    rate_limiter: Arc<RateLimiter>,
    metrics: Arc<MetricsTracker>,
    scorer: ProviderScorer,
    stats: Arc<StatsCollector>,
}

impl Router {
    /// Create a new router
    pub fn new(
        rate_limiter: Arc<RateLimiter>,
        metrics: Arc<MetricsTracker>,
        stats: Arc<StatsCollector>,
    ) -> Self {
        Self {
            rate_limiter,
            scorer: ProviderScorer::new(metrics.clone()),
            metrics,
            stats,
        }
    }

    /// Scorer used to rank candidates
    pub fn scorer(&self) -> &ProviderScorer {
        &self.scorer
    }

    /// Pick the best admissible provider for a request
    pub fn select_optimal_provider(
        &self,
        request: &RoutingRequest,
        candidate_providers: &[ProviderId],
    ) -> RoutingDecision {
        self.select_optimal_provider_at(request, candidate_providers, Instant::now())
    }

    /// [`select_optimal_provider`](Self::select_optimal_provider) with admission
    /// checked against an explicit clock reading
    pub fn select_optimal_provider_at(
        &self,
        request: &RoutingRequest,
        candidate_providers: &[ProviderId],
        now: Instant,
    ) -> RoutingDecision {
        let started = Instant::now();
        let decision = self.decide(request, candidate_providers, now);
        self.stats
            .record_routing_time(started.elapsed().as_secs_f64() * 1000.0);
        decision
    }

    fn decide(
        &self,
        request: &RoutingRequest,
        candidate_providers: &[ProviderId],
        now: Instant,
    ) -> RoutingDecision {
        if candidate_providers.is_empty() {
            debug!("No candidate providers supplied");
            return RoutingDecision::no_providers();
        }

        let user_id = request.user_id.as_deref();
        let available: Vec<&ProviderId> = candidate_providers
            .iter()
            .filter(|p| self.rate_limiter.check_rate_limit_at(p, user_id, now))
            .collect();

        if available.is_empty() {
            debug!(
                "All {} candidate providers are rate limited",
                candidate_providers.len()
            );
            return RoutingDecision::all_rate_limited();
        }

        let mut scored: Vec<(&ProviderId, f64)> = available
            .into_iter()
            .map(|p| (p, self.scorer.calculate_provider_score(p, request)))
            .collect();

        // Stable: equal scores keep candidate order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let (best, score) = scored[0];
        debug!(
            "Selected provider {} with score {:.3} for {:?} request",
            best, score, request.task
        );
        RoutingDecision::selected(best.clone(), score)
    }

    /// Provider with the lowest smoothed cost among those with telemetry.
    ///
    /// Falls back to the first candidate when none have telemetry; `None` only
    /// for an empty list.
    pub fn get_cheapest_provider(&self, providers: &[ProviderId]) -> Option<ProviderId> {
        self.pick_min(providers, |m| m.cost_per_request)
    }

    /// Provider with the lowest smoothed latency among those with telemetry.
    ///
    /// Falls back to the first candidate when none have telemetry; `None` only
    /// for an empty list.
    pub fn get_fastest_provider(&self, providers: &[ProviderId]) -> Option<ProviderId> {
        self.pick_min(providers, |m| m.average_response_time_ms)
    }

    fn pick_min<F>(&self, providers: &[ProviderId], key: F) -> Option<ProviderId>
    where
        F: Fn(&super::metrics::ProviderMetrics) -> f64,
    {
        let first = providers.first()?;

        let mut best: Option<(&ProviderId, f64)> = None;
        for provider in providers {
            let Some(metrics) = self.metrics.find(provider) else {
                continue;
            };
            if metrics.total_requests == 0 {
                continue;
            }
            let value = key(&metrics);
            if best.is_none_or(|(_, current)| value < current) {
                best = Some((provider, value));
            }
        }

        Some(best.map_or(first, |(p, _)| p).clone())
    }
}
