//! Threat assessment over the standard and enhanced rule tables

use super::rules::ThreatPolicy;
use super::types::{SecurityAssessment, ThreatLevel, UserContext};
use crate::config::models::security::SecurityFeatures;
use crate::core::stats::StatsCollector;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Mitigation reported for denied requests
pub const BLOCKED_MITIGATION: &str = "Request blocked due to security concerns";
const MONITOR_MITIGATION: &str = "Allow with monitoring";

/// Screens request content against a [`ThreatPolicy`].
///
/// Assessment never fails. Denials are counted in the shared gateway stats.
pub struct ThreatAssessor {
    standard: ThreatPolicy,
    enhanced: ThreatPolicy,
    features: RwLock<SecurityFeatures>,
    stats: Arc<StatsCollector>,
}

impl ThreatAssessor {
    /// Create an assessor with the built-in rule tables
    pub fn new(features: SecurityFeatures, stats: Arc<StatsCollector>) -> Self {
        Self::with_policies(ThreatPolicy::standard(), ThreatPolicy::enhanced(), features, stats)
    }

    /// Create an assessor with custom rule tables
    pub fn with_policies(
        standard: ThreatPolicy,
        enhanced: ThreatPolicy,
        features: SecurityFeatures,
        stats: Arc<StatsCollector>,
    ) -> Self {
        Self {
            standard,
            enhanced,
            features: RwLock::new(features),
            stats,
        }
    }

    /// Current feature toggles
    pub fn features(&self) -> SecurityFeatures {
        *self.features.read()
    }

    /// Replace the feature toggles; takes effect on the next assessment
    pub fn update_features(&self, features: SecurityFeatures) {
        info!(
            "Updating security features: threat_detection={} content_filtering={} \
             pii_detection={} malicious_prompt_detection={}",
            features.threat_detection,
            features.content_filtering,
            features.pii_detection,
            features.malicious_prompt_detection
        );
        *self.features.write() = features;
    }

    /// Screen content with the standard profile
    pub fn assess_request_security(
        &self,
        content: &str,
        user_context: &UserContext,
    ) -> SecurityAssessment {
        self.assess(&self.standard, content, user_context)
    }

    /// Screen content with the enhanced profile
    pub fn assess_enhanced_security(
        &self,
        content: &str,
        user_context: &UserContext,
    ) -> SecurityAssessment {
        self.assess(&self.enhanced, content, user_context)
    }

    fn assess(
        &self,
        policy: &ThreatPolicy,
        content: &str,
        user_context: &UserContext,
    ) -> SecurityAssessment {
        let features = self.features();
        if !features.threat_detection {
            return SecurityAssessment::clean();
        }

        let matched = policy.detect(content, &features);
        let threat_level = policy.level(&matched);
        let detected_threats: Vec<String> = matched.iter().map(|r| r.tag.to_string()).collect();
        let allow_request = policy.allows(threat_level);

        let mitigation_action = if !allow_request {
            self.stats.record_blocked();
            warn!(
                "Blocked request from {} ({} profile): level={} threats={:?}",
                user_context.display_id(),
                policy.name,
                threat_level,
                detected_threats
            );
            BLOCKED_MITIGATION
        } else if threat_level > ThreatLevel::None {
            debug!(
                "Flagged request from {} ({} profile): level={} threats={:?}",
                user_context.display_id(),
                policy.name,
                threat_level,
                detected_threats
            );
            MONITOR_MITIGATION
        } else {
            "none"
        };

        SecurityAssessment {
            threat_level,
            detected_threats,
            allow_request,
            mitigation_action: mitigation_action.to_string(),
        }
    }
}
