//! Process-wide gateway counters
//!
//! Shared by the rate limiter, router and threat assessor. All writes go
//! through [`StatsCollector`], which guards a single [`GatewayStats`].

use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write as _;

/// Aggregate outcome counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayStats {
    /// Requests recorded as admitted
    pub total_requests: u64,
    /// Requests denied by threat assessment
    pub blocked_requests: u64,
    /// Admission checks denied by a rate limit
    pub rate_limited_requests: u64,
    /// Mean wall time of routing decisions
    pub average_routing_time_ms: f64,
    /// Recorded requests per provider
    pub requests_per_provider: HashMap<String, u64>,
    /// Routing decisions folded into `average_routing_time_ms`
    pub routing_decisions: u64,
}

impl GatewayStats {
    /// Render the counters in Prometheus text exposition format
    pub fn export_prometheus(&self) -> String {
        let mut output = String::new();

        write_metric(
            &mut output,
            "gateway_requests_total",
            "Total number of recorded requests",
            "counter",
            self.total_requests as f64,
        );
        write_metric(
            &mut output,
            "gateway_blocked_requests_total",
            "Requests blocked by threat assessment",
            "counter",
            self.blocked_requests as f64,
        );
        write_metric(
            &mut output,
            "gateway_rate_limited_requests_total",
            "Admission checks denied by rate limits",
            "counter",
            self.rate_limited_requests as f64,
        );
        write_metric(
            &mut output,
            "gateway_routing_time_ms",
            "Average routing decision time in milliseconds",
            "gauge",
            self.average_routing_time_ms,
        );

        output.push_str("# HELP gateway_provider_requests_total Recorded requests per provider\n");
        output.push_str("# TYPE gateway_provider_requests_total counter\n");
        let mut providers: Vec<_> = self.requests_per_provider.iter().collect();
        providers.sort_by(|a, b| a.0.cmp(b.0));
        for (provider, count) in providers {
            let _ = writeln!(
                output,
                "gateway_provider_requests_total{{provider=\"{}\"}} {}",
                provider, count
            );
        }

        output
    }
}

fn write_metric(output: &mut String, name: &str, help: &str, kind: &str, value: f64) {
    let _ = writeln!(output, "# HELP {} {}", name, help);
    let _ = writeln!(output, "# TYPE {} {}", name, kind);
    let _ = writeln!(output, "{} {}", name, value);
}

/// Synchronized owner of the gateway's [`GatewayStats`]
#[derive(Debug, Default)]
pub struct StatsCollector {
    stats: Mutex<GatewayStats>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an admitted request against `provider_id`
    pub fn record_request(&self, provider_id: &str) {
        let mut stats = self.stats.lock();
        stats.total_requests += 1;
        match stats.requests_per_provider.get_mut(provider_id) {
            Some(count) => *count += 1,
            None => {
                stats.requests_per_provider.insert(provider_id.to_string(), 1);
            }
        }
    }

    pub fn record_rate_limited(&self) {
        self.stats.lock().rate_limited_requests += 1;
    }

    pub fn record_blocked(&self) {
        self.stats.lock().blocked_requests += 1;
    }

    /// Fold one routing duration into the running mean
    pub fn record_routing_time(&self, elapsed_ms: f64) {
        let mut stats = self.stats.lock();
        stats.routing_decisions += 1;
        let n = stats.routing_decisions as f64;
        stats.average_routing_time_ms += (elapsed_ms - stats.average_routing_time_ms) / n;
    }

    /// Copy of the current counters
    pub fn snapshot(&self) -> GatewayStats {
        self.stats.lock().clone()
    }

    /// Zero every counter
    pub fn reset(&self) {
        *self.stats.lock() = GatewayStats::default();
    }

    /// Hold the stats lock, for resets that must span several components
    pub(crate) fn lock(&self) -> MutexGuard<'_, GatewayStats> {
        self.stats.lock()
    }
}
