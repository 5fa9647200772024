//! Request content screening
//!
//! Both threat profiles are [`ThreatPolicy`] rule tables evaluated by the
//! same [`ThreatAssessor`] code path.

mod assessor;
mod patterns;
mod rules;
mod types;


pub use assessor::{BLOCKED_MITIGATION, ThreatAssessor};
pub use patterns::{CREDIT_CARD_PATTERN, SSN_PATTERN};
pub use rules::{Escalation, MAX_INPUT_CHARS, Matcher, RuleFamily, ThreatPolicy, ThreatRule};
pub use types::{SecurityAssessment, ThreatLevel, UserContext};
