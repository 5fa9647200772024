//! Security type definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Ordinal threat classification
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ThreatLevel::None => "none",
            ThreatLevel::Low => "low",
            ThreatLevel::Medium => "medium",
            ThreatLevel::High => "high",
            ThreatLevel::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Verdict for one piece of request content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityAssessment {
    /// Overall level
    pub threat_level: ThreatLevel,
    /// Distinct tags, in rule-table order
    pub detected_threats: Vec<String>,
    /// Whether the request may proceed
    pub allow_request: bool,
    /// What the caller should do about it
    pub mitigation_action: String,
}

impl SecurityAssessment {
    /// Assessment with no findings
    pub fn clean() -> Self {
        Self {
            threat_level: ThreatLevel::None,
            detected_threats: Vec::new(),
            allow_request: true,
            mitigation_action: "none".to_string(),
        }
    }

    /// Whether a tag was reported
    pub fn has_threat(&self, tag: &str) -> bool {
        self.detected_threats.iter().any(|t| t == tag)
    }
}

/// Who sent the content; used for attribution in logs only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    /// User or session id
    #[serde(default)]
    pub user_id: Option<String>,
    /// Free-form caller attributes
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl UserContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            attributes: HashMap::new(),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// User id for log lines
    pub fn display_id(&self) -> &str {
        self.user_id.as_deref().unwrap_or("anonymous")
    }
}
