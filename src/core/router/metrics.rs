//! Per-provider performance telemetry
//!
//! Latency and cost are smoothed with an exponential moving average so the
//! router reacts to recent behaviour without being thrown by single outliers.

use chrono::{DateTime, Utc};
use parking_lot::{RwLock, RwLockWriteGuard};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write as _;
use tracing::{debug, info};

/// Smoothing factor applied to every new latency and cost sample
pub const EMA_ALPHA: f64 = 0.1;

/// Smoothed telemetry for one provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderMetrics {
    /// EMA of response time in milliseconds
    pub average_response_time_ms: f64,
    /// `1 - failed_requests / total_requests`
    pub success_rate: f64,
    /// EMA of non-zero per-request cost in dollars
    pub cost_per_request: f64,
    /// Completed calls reported
    pub total_requests: u64,
    /// Completed calls reported as failures
    pub failed_requests: u64,
    /// Time of the most recent update
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for ProviderMetrics {
    fn default() -> Self {
        Self {
            average_response_time_ms: 0.0,
            success_rate: 1.0,
            cost_per_request: 0.0,
            total_requests: 0,
            failed_requests: 0,
            last_updated: None,
        }
    }
}

impl ProviderMetrics {
    /// Fold one completed call into the metrics
    pub fn apply_sample(&mut self, response_time_ms: f64, success: bool, cost: f64) {
        // Non-finite or negative latencies would poison the average for good
        if response_time_ms.is_finite() && response_time_ms >= 0.0 {
            self.average_response_time_ms =
                EMA_ALPHA * response_time_ms + (1.0 - EMA_ALPHA) * self.average_response_time_ms;
        }

        self.total_requests += 1;
        if !success {
            self.failed_requests += 1;
        }
        self.success_rate = 1.0 - self.failed_requests as f64 / self.total_requests as f64;

        // Zero cost means "not reported", not "free"
        if cost.is_finite() && cost > 0.0 {
            self.cost_per_request = EMA_ALPHA * cost + (1.0 - EMA_ALPHA) * self.cost_per_request;
        }

        self.last_updated = Some(Utc::now());
    }
}

/// Owner of all [`ProviderMetrics`]
#[derive(Debug, Default)]
pub struct MetricsTracker {
    metrics: RwLock<HashMap<String, ProviderMetrics>>,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a completed provider call
    pub fn update_provider_metrics(
        &self,
        provider_id: &str,
        response_time_ms: f64,
        success: bool,
        cost: f64,
    ) {
        let mut metrics = self.metrics.write();
        let entry = metrics.entry(provider_id.to_string()).or_default();

        entry.apply_sample(response_time_ms, success, cost);

        debug!(
            "Updated metrics for {}: avg={:.1}ms success_rate={:.3} cost={:.5}",
            provider_id, entry.average_response_time_ms, entry.success_rate, entry.cost_per_request
        );
    }

    /// Metrics for a provider, or the default struct if none were reported
    pub fn get_provider_metrics(&self, provider_id: &str) -> ProviderMetrics {
        self.find(provider_id).unwrap_or_default()
    }

    /// Metrics for a provider only if any were reported
    pub fn find(&self, provider_id: &str) -> Option<ProviderMetrics> {
        self.metrics.read().get(provider_id).cloned()
    }

    /// Snapshot of every provider's metrics
    pub fn get_all_provider_metrics(&self) -> HashMap<String, ProviderMetrics> {
        self.metrics.read().clone()
    }

    /// Forget all metrics
    pub fn clear(&self) {
        info!("Clearing provider metrics");
        self.metrics.write().clear();
    }

    /// Hold the metrics write lock, for resets that must span several components
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, ProviderMetrics>> {
        self.metrics.write()
    }

    /// Render per-provider gauges in Prometheus text exposition format
    pub fn export_prometheus(&self) -> String {
        let metrics = self.metrics.read();
        let mut providers: Vec<_> = metrics.iter().collect();
        providers.sort_by(|a, b| a.0.cmp(b.0));

        let mut output = String::new();
        output.push_str(
            "# HELP gateway_provider_response_time_ms Smoothed response time per provider\n",
        );
        output.push_str("# TYPE gateway_provider_response_time_ms gauge\n");
        for (provider, m) in &providers {
            let _ = writeln!(
                output,
                "gateway_provider_response_time_ms{{provider=\"{}\"}} {}",
                provider, m.average_response_time_ms
            );
        }

        output.push_str("# HELP gateway_provider_success_rate Success rate per provider\n");
        output.push_str("# TYPE gateway_provider_success_rate gauge\n");
        for (provider, m) in &providers {
            let _ = writeln!(
                output,
                "gateway_provider_success_rate{{provider=\"{}\"}} {}",
                provider, m.success_rate
            );
        }

        output.push_str("# HELP gateway_provider_cost_per_request Smoothed cost per request\n");
        output.push_str("# TYPE gateway_provider_cost_per_request gauge\n");
        for (provider, m) in &providers {
            let _ = writeln!(
                output,
                "gateway_provider_cost_per_request{{provider=\"{}\"}} {}",
                provider, m.cost_per_request
            );
        }

        output
    }
}
