//! Routing request and decision types

use serde::{Deserialize, Serialize};

/// Provider identifier, e.g. "gemini"
pub type ProviderId = String;

/// Reason reported when the candidate list is empty
pub const NO_PROVIDERS_REASON: &str = "No providers available";
/// Reason reported when every candidate failed admission
pub const ALL_LIMITED_REASON: &str = "All providers rate-limited or unavailable";
/// Reason reported for a successful selection
pub const SELECTED_REASON: &str = "Selected based on performance metrics and availability";

/// Coarse classification of what the request asks a model to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    #[default]
    Chat,
    TextGeneration,
    Summarization,
    Translation,
    CodeGeneration,
    Analysis,
}

/// Inbound request descriptor, as handed over by the dispatcher
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingRequest {
    /// Prompt text
    pub input_text: String,
    /// Task classification
    #[serde(default)]
    pub task: TaskKind,
    /// User or session id for attribution
    #[serde(default)]
    pub user_id: Option<String>,
}

impl RoutingRequest {
    pub fn new(input_text: impl Into<String>, task: TaskKind) -> Self {
        Self {
            input_text: input_text.into(),
            task,
            user_id: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Outcome of a routing call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Chosen provider; empty when nothing could be selected
    pub selected_provider_id: ProviderId,
    /// Human-readable explanation
    pub reason: String,
    /// Score of the chosen provider in [0, 1]; 0 when nothing was selected
    pub confidence_score: f64,
    /// Whether the caller may serve the request from a response cache
    pub use_cache: bool,
}

impl RoutingDecision {
    pub fn no_providers() -> Self {
        Self::unselected(NO_PROVIDERS_REASON)
    }

    pub fn all_rate_limited() -> Self {
        Self::unselected(ALL_LIMITED_REASON)
    }

    pub fn selected(provider_id: impl Into<ProviderId>, confidence_score: f64) -> Self {
        Self {
            selected_provider_id: provider_id.into(),
            reason: SELECTED_REASON.to_string(),
            confidence_score,
            use_cache: false,
        }
    }

    /// Whether a provider was chosen
    pub fn is_selected(&self) -> bool {
        !self.selected_provider_id.is_empty()
    }

    fn unselected(reason: &str) -> Self {
        Self {
            selected_provider_id: String::new(),
            reason: reason.to_string(),
            confidence_score: 0.0,
            use_cache: false,
        }
    }
}
