//! Threat detection feature toggles

use serde::{Deserialize, Serialize};

/// Named switches gating the threat assessor's rule families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityFeatures {
    /// Master switch; when off every request is assessed as `None` and allowed
    #[serde(default = "default_true")]
    pub threat_detection: bool,
    /// Input length and data exfiltration rules
    #[serde(default = "default_true")]
    pub content_filtering: bool,
    /// PII keyword and pattern rules
    #[serde(default = "default_true")]
    pub pii_detection: bool,
    /// Prompt injection and malicious instruction rules
    #[serde(default = "default_true")]
    pub malicious_prompt_detection: bool,
}

impl Default for SecurityFeatures {
    fn default() -> Self {
        Self {
            threat_detection: true,
            content_filtering: true,
            pii_detection: true,
            malicious_prompt_detection: true,
        }
    }
}

impl SecurityFeatures {
    /// All detection switched off
    pub fn disabled() -> Self {
        Self {
            threat_detection: false,
            content_filtering: false,
            pii_detection: false,
            malicious_prompt_detection: false,
        }
    }
}

fn default_true() -> bool {
    true
}
