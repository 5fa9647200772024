//! Custom test assertions

use ai_control_plane::{RoutingDecision, SecurityAssessment};

/// Assertions for RoutingDecision
pub trait RoutingDecisionAssertions {
    /// Assert a provider was chosen
    fn assert_selected(&self, provider: &str);

    /// Assert nothing was chosen, for the given reason
    fn assert_unselected(&self, reason: &str);
}

impl RoutingDecisionAssertions for RoutingDecision {
    fn assert_selected(&self, provider: &str) {
        assert_eq!(
            self.selected_provider_id, provider,
            "Expected {} to be selected, reason: {}",
            provider, self.reason
        );
        assert!(self.confidence_score > 0.0 && self.confidence_score <= 1.0);
    }

    fn assert_unselected(&self, reason: &str) {
        assert!(
            self.selected_provider_id.is_empty(),
            "Expected no selection, got {}",
            self.selected_provider_id
        );
        assert_eq!(self.reason, reason);
        assert_eq!(self.confidence_score, 0.0);
    }
}

/// Assertions for SecurityAssessment
pub trait SecurityAssessmentAssertions {
    fn assert_allowed(&self);
    fn assert_blocked(&self);
}

impl SecurityAssessmentAssertions for SecurityAssessment {
    fn assert_allowed(&self) {
        assert!(
            self.allow_request,
            "Expected request to be allowed, got {:?} with {:?}",
            self.threat_level, self.detected_threats
        );
    }

    fn assert_blocked(&self) {
        assert!(
            !self.allow_request,
            "Expected request to be blocked, got {:?} with {:?}",
            self.threat_level, self.detected_threats
        );
    }
}

/// Assert two values are approximately equal (for floats)
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {
        $crate::assert_approx_eq!($left, $right, 1e-6_f64)
    };
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right): (f64, f64) = ($left, $right);
        assert!(
            (left - right).abs() < $epsilon,
            "assertion failed: `{} ≈ {}` (epsilon: {})",
            left,
            right,
            $epsilon
        );
    }};
}
