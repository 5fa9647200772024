//! # ai-control-plane
//!
//! In-process control plane for an AI gateway: decides whether a request may
//! go to a provider, which provider should take it, and whether its content
//! is safe to forward.
//!
//! ## Features
//!
//! - **Admission control**: per-provider sliding-window rate limits
//! - **Telemetry**: exponentially smoothed latency, cost and success rate
//! - **Routing**: score-ranked selection over admissible providers
//! - **Threat screening**: rule-table content assessment with feature toggles
//! - **Observability**: shared counters with Prometheus text export
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ai_control_plane::{Config, Gateway, RoutingRequest, TaskKind, UserContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::from_config(&config)?;
//!
//!     let request = RoutingRequest::new("Summarize this report", TaskKind::Summarization)
//!         .with_user("user-1");
//!     let user = UserContext::new("user-1");
//!     let verdict = gateway.assess_request_security(&request.input_text, &user);
//!     if verdict.allow_request {
//!         let candidates = vec!["gemini".to_string(), "openai".to_string()];
//!         let decision = gateway.select_optimal_provider(&request, &candidates);
//!         if decision.is_selected() {
//!             gateway.record_request(&decision.selected_provider_id, Some("user-1"));
//!             // ... call the provider, then report back
//!             gateway.update_provider_metrics(&decision.selected_provider_id, 420.0, true, 0.002);
//!         }
//!     }
//!
//!     println!("{}", gateway.export_prometheus());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{GatewayError, Result};

pub use core::Gateway;
pub use core::rate_limiter::{RateLimitDenial, RateLimitStatus, RateLimitWindow, RateLimiter};
pub use core::router::{
    MetricsTracker, ProviderId, ProviderMetrics, ProviderScorer, Router, RoutingDecision,
    RoutingRequest, TaskKind,
};
pub use core::security::{
    SecurityAssessment, ThreatAssessor, ThreatLevel, ThreatPolicy, UserContext,
};
pub use core::stats::{GatewayStats, StatsCollector};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Crate description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
