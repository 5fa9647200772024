//! Rate limiter types and data structures

use crate::config::models::rate_limit::RateLimitConfig;
use serde::Serialize;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub(super) const MINUTE: Duration = Duration::from_secs(60);
pub(super) const HOUR: Duration = Duration::from_secs(60 * 60);
pub(super) const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Which bound rejected an admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitWindow {
    Minute,
    Hour,
    Day,
}

/// Reason an admission check was denied
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("rate limited: {count}/{limit} requests in the last {window:?}")]
pub struct RateLimitDenial {
    pub window: RateLimitWindow,
    pub count: u32,
    pub limit: u32,
}

/// Point-in-time view of one provider's quota usage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateLimitStatus {
    pub provider_id: String,
    /// False when the provider falls back to the unconfigured default
    pub configured: bool,
    pub config: RateLimitConfig,
    pub minute_count: u32,
    pub hour_count: u32,
    /// Requests retained in history; spans a day only when daily limits are enforced
    pub retained_count: u32,
}

/// Quota and request history for one provider
#[derive(Debug, Clone)]
pub(super) struct RateLimitTracker {
    pub(super) config: RateLimitConfig,
    /// Non-decreasing admission times
    pub(super) timestamps: VecDeque<Instant>,
}

impl RateLimitTracker {
    pub(super) fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            timestamps: VecDeque::new(),
        }
    }

    /// Append an admission, never moving backwards in time
    pub(super) fn push(&mut self, now: Instant) {
        let at = match self.timestamps.back() {
            Some(&last) if last > now => last,
            _ => now,
        };
        self.timestamps.push_back(at);
    }

    /// Append an admission and drop history older than `horizon`, so disabled
    /// and fallback trackers stay bounded too
    pub(super) fn record(&mut self, now: Instant, horizon: Duration) {
        self.push(now);
        self.prune(now, horizon);
    }

    /// Drop entries older than `horizon`
    pub(super) fn prune(&mut self, now: Instant, horizon: Duration) {
        while let Some(&oldest) = self.timestamps.front() {
            if now.saturating_duration_since(oldest) > horizon {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }
    }

    /// Entries younger than `window`
    pub(super) fn count_younger_than(&self, now: Instant, window: Duration) -> u32 {
        self.timestamps
            .iter()
            .rev()
            .take_while(|&&t| now.saturating_duration_since(t) < window)
            .count() as u32
    }

    /// Entries no older than `window`
    pub(super) fn count_within(&self, now: Instant, window: Duration) -> u32 {
        self.timestamps
            .iter()
            .rev()
            .take_while(|&&t| now.saturating_duration_since(t) <= window)
            .count() as u32
    }

    /// Prune, then compare the retained history against the quota
    pub(super) fn evaluate(
        &mut self,
        now: Instant,
        enforce_daily_limit: bool,
    ) -> Result<(), RateLimitDenial> {
        let horizon = if enforce_daily_limit { DAY } else { HOUR };
        self.prune(now, horizon);

        if !self.config.enabled {
            return Ok(());
        }

        let minute_count = self.count_younger_than(now, MINUTE);
        if minute_count >= self.config.requests_per_minute {
            return Err(RateLimitDenial {
                window: RateLimitWindow::Minute,
                count: minute_count,
                limit: self.config.requests_per_minute,
            });
        }

        let hour_count = self.count_within(now, HOUR);
        if hour_count >= self.config.requests_per_hour {
            return Err(RateLimitDenial {
                window: RateLimitWindow::Hour,
                count: hour_count,
                limit: self.config.requests_per_hour,
            });
        }

        if enforce_daily_limit {
            let day_count = self.timestamps.len() as u32;
            if day_count >= self.config.requests_per_day {
                return Err(RateLimitDenial {
                    window: RateLimitWindow::Day,
                    count: day_count,
                    limit: self.config.requests_per_day,
                });
            }
        }

        Ok(())
    }
}
