//! Telemetry-driven provider routing
//!
//! - `metrics` - per-provider exponential moving average telemetry
//! - `scorer` - weighted score over success rate, speed and cost
//! - `router` - admission-filtered, score-ranked provider selection
//! - `types` - request and decision types

pub mod metrics;
pub mod router;
pub mod scorer;
pub mod types;

#[cfg(test)]
mod tests;

pub use metrics::{EMA_ALPHA, MetricsTracker, ProviderMetrics};
pub use router::Router;
pub use scorer::{ProviderScorer, score_metrics};
pub use types::{
    ALL_LIMITED_REASON, NO_PROVIDERS_REASON, ProviderId, RoutingDecision, RoutingRequest,
    SELECTED_REASON, TaskKind,
};
