//! Core rate limiter implementation

use super::types::{DAY, HOUR, MINUTE, RateLimitDenial, RateLimitStatus, RateLimitTracker};
use crate::config::models::rate_limit::{RateLimitConfig, RateLimiterSettings};
use crate::core::stats::StatsCollector;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Per-provider sliding-window admission control.
///
/// Each provider's prune, count and compare sequence runs under that
/// provider's map entry guard. Providers that were never configured are
/// evaluated against the fallback config, which is unlimited unless replaced
/// with [`RateLimiter::with_fallback`].
pub struct RateLimiter {
    /// Trackers keyed by provider id
    pub(super) trackers: DashMap<String, RateLimitTracker>,
    /// Quota for providers without a tracker
    fallback: RateLimitConfig,
    /// Limiter-wide behaviour
    settings: RateLimiterSettings,
    /// Shared gateway counters
    stats: Arc<StatsCollector>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(settings: RateLimiterSettings, stats: Arc<StatsCollector>) -> Self {
        Self {
            trackers: DashMap::new(),
            fallback: RateLimitConfig::unlimited(),
            settings,
            stats,
        }
    }

    /// Replace the quota applied to unconfigured providers
    pub fn with_fallback(mut self, fallback: RateLimitConfig) -> Self {
        self.fallback = fallback;
        self
    }

    /// How far back request history is kept
    pub fn horizon(&self) -> Duration {
        if self.settings.enforce_daily_limit {
            DAY
        } else {
            HOUR
        }
    }

    /// Install or replace the quota for a provider, keeping its history
    pub fn configure_rate_limit(&self, provider_id: &str, config: RateLimitConfig) {
        debug!(
            "Configuring rate limit for {}: {}/min {}/h {}/day enabled={}",
            provider_id,
            config.requests_per_minute,
            config.requests_per_hour,
            config.requests_per_day,
            config.enabled
        );

        match self.trackers.entry(provider_id.to_string()) {
            Entry::Occupied(mut entry) => entry.get_mut().config = config,
            Entry::Vacant(entry) => {
                entry.insert(RateLimitTracker::new(config));
            }
        }
    }

    /// Quota currently applied to a provider
    pub fn config_for(&self, provider_id: &str) -> RateLimitConfig {
        self.trackers
            .get(provider_id)
            .map(|t| t.config.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }

    /// Whether a provider may take another request right now.
    ///
    /// Does not record anything; pair with [`record_request`](Self::record_request)
    /// or use [`try_admit`](Self::try_admit) for a single-step admission.
    pub fn check_rate_limit(&self, provider_id: &str, user_id: Option<&str>) -> bool {
        self.check_rate_limit_at(provider_id, user_id, Instant::now())
    }

    /// [`check_rate_limit`](Self::check_rate_limit) against an explicit clock reading
    pub fn check_rate_limit_at(
        &self,
        provider_id: &str,
        user_id: Option<&str>,
        now: Instant,
    ) -> bool {
        let outcome = match self.trackers.get_mut(provider_id) {
            Some(mut tracker) => tracker.evaluate(now, self.settings.enforce_daily_limit),
            None => RateLimitTracker::new(self.fallback.clone())
                .evaluate(now, self.settings.enforce_daily_limit),
        };

        self.finish_check(provider_id, user_id, outcome)
    }

    /// Record an admitted request for a provider
    pub fn record_request(&self, provider_id: &str, user_id: Option<&str>) {
        self.record_request_at(provider_id, user_id, Instant::now());
    }

    /// [`record_request`](Self::record_request) against an explicit clock reading
    pub fn record_request_at(&self, provider_id: &str, user_id: Option<&str>, now: Instant) {
        let horizon = self.horizon();
        match self.trackers.get_mut(provider_id) {
            Some(mut tracker) => tracker.record(now, horizon),
            None => self
                .trackers
                .entry(provider_id.to_string())
                .or_insert_with(|| RateLimitTracker::new(self.fallback.clone()))
                .record(now, horizon),
        }

        self.stats.record_request(provider_id);
        debug!(
            "Recorded request for {} (user: {})",
            provider_id,
            user_id.unwrap_or("anonymous")
        );
    }

    /// Check and record in one critical section, so concurrent callers
    /// cannot both take the last slot of a quota
    pub fn try_admit(&self, provider_id: &str, user_id: Option<&str>) -> bool {
        self.try_admit_at(provider_id, user_id, Instant::now())
    }

    /// [`try_admit`](Self::try_admit) against an explicit clock reading
    pub fn try_admit_at(&self, provider_id: &str, user_id: Option<&str>, now: Instant) -> bool {
        let outcome = {
            let mut tracker = self
                .trackers
                .entry(provider_id.to_string())
                .or_insert_with(|| RateLimitTracker::new(self.fallback.clone()));

            let outcome = tracker.evaluate(now, self.settings.enforce_daily_limit);
            if outcome.is_ok() {
                tracker.record(now, self.horizon());
            }
            outcome
        };

        let admitted = self.finish_check(provider_id, user_id, outcome);
        if admitted {
            self.stats.record_request(provider_id);
        }
        admitted
    }

    /// Current usage for a provider, after pruning expired history
    pub fn rate_limit_status(&self, provider_id: &str) -> RateLimitStatus {
        self.rate_limit_status_at(provider_id, Instant::now())
    }

    /// [`rate_limit_status`](Self::rate_limit_status) against an explicit clock reading
    pub fn rate_limit_status_at(&self, provider_id: &str, now: Instant) -> RateLimitStatus {
        let horizon = self.horizon();
        match self.trackers.get_mut(provider_id) {
            Some(mut tracker) => {
                tracker.prune(now, horizon);
                RateLimitStatus {
                    provider_id: provider_id.to_string(),
                    configured: true,
                    config: tracker.config.clone(),
                    minute_count: tracker.count_younger_than(now, MINUTE),
                    hour_count: tracker.count_within(now, HOUR),
                    retained_count: tracker.timestamps.len() as u32,
                }
            }
            None => RateLimitStatus {
                provider_id: provider_id.to_string(),
                configured: false,
                config: self.fallback.clone(),
                minute_count: 0,
                hour_count: 0,
                retained_count: 0,
            },
        }
    }

    /// Drop expired history for every provider
    pub fn prune_expired_at(&self, now: Instant) {
        let horizon = self.horizon();
        for mut tracker in self.trackers.iter_mut() {
            tracker.prune(now, horizon);
        }
    }

    /// Providers with an installed tracker
    pub fn configured_providers(&self) -> Vec<String> {
        let mut providers: Vec<String> = self.trackers.iter().map(|e| e.key().clone()).collect();
        providers.sort();
        providers
    }

    fn finish_check(
        &self,
        provider_id: &str,
        user_id: Option<&str>,
        outcome: Result<(), RateLimitDenial>,
    ) -> bool {
        match outcome {
            Ok(()) => true,
            Err(denial) => {
                self.stats.record_rate_limited();
                debug!(
                    "Rate limit exceeded for {} (user: {}): {}",
                    provider_id,
                    user_id.unwrap_or("anonymous"),
                    denial
                );
                false
            }
        }
    }
}
