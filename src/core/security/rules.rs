//! Threat rule tables
//!
//! A [`ThreatPolicy`] is a list of [`ThreatRule`]s plus the rule that turns
//! matched rules into a [`ThreatLevel`]. Keyword matching is case-insensitive
//! substring matching; the caller lowercases the content once per assessment.

use super::patterns::{CREDIT_CARD_PATTERN, SSN_PATTERN};
use super::types::ThreatLevel;
use crate::config::models::security::SecurityFeatures;
use once_cell::sync::Lazy;
use regex::Regex;

/// Content longer than this many characters is flagged as oversized
pub const MAX_INPUT_CHARS: usize = 50_000;

/// Rule families, each gated by a feature toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleFamily {
    Pii,
    PromptInjection,
    MaliciousInstructions,
    DataExfiltration,
    InputSize,
}

impl RuleFamily {
    /// Whether the toggles let this family run. `threat_detection` is checked
    /// by the assessor before any rule is considered.
    pub fn enabled_by(self, features: &SecurityFeatures) -> bool {
        match self {
            RuleFamily::Pii => features.pii_detection,
            RuleFamily::PromptInjection | RuleFamily::MaliciousInstructions => {
                features.malicious_prompt_detection
            }
            RuleFamily::DataExfiltration | RuleFamily::InputSize => features.content_filtering,
        }
    }
}

/// How a rule recognises content
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Any of these lowercase phrases occurs in the lowercased content
    Keywords(&'static [&'static str]),
    /// The regex matches the content as given
    Pattern(&'static Lazy<Regex>),
    /// Content is longer than this many characters
    MaxChars(usize),
}

impl Matcher {
    pub fn is_match(&self, content: &str, lowered: &str) -> bool {
        match self {
            Matcher::Keywords(words) => words.iter().any(|w| lowered.contains(w)),
            Matcher::Pattern(regex) => regex.is_match(content),
            Matcher::MaxChars(limit) => content.chars().count() > *limit,
        }
    }
}

/// One row of a rule table
#[derive(Debug, Clone, Copy)]
pub struct ThreatRule {
    /// Tag reported when the rule matches
    pub tag: &'static str,
    pub family: RuleFamily,
    pub matcher: Matcher,
    /// Level contributed under [`Escalation::MaxSeverity`]
    pub severity: ThreatLevel,
}

/// How matched rules become a threat level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    /// By number of distinct tags: 0 none, 1 low, 2 medium, 3 or more high
    TagCount,
    /// Highest severity among matched rules
    MaxSeverity,
}

/// A rule table with its escalation and blocking threshold
#[derive(Debug, Clone)]
pub struct ThreatPolicy {
    pub name: &'static str,
    pub rules: Vec<ThreatRule>,
    pub escalation: Escalation,
    /// Requests at or above this level are denied
    pub block_at: ThreatLevel,
}

const STANDARD_PII: &[&str] = &["ssn", "social security", "credit card", "password"];
const STANDARD_INJECTION: &[&str] = &[
    "ignore previous instructions",
    "jailbreak",
    "pretend you are",
];

const PROMPT_INJECTION: &[&str] = &[
    "ignore previous instructions",
    "ignore all previous",
    "disregard previous",
    "disregard your instructions",
    "forget your instructions",
    "jailbreak",
    "pretend you are",
    "act as if you have no restrictions",
    "developer mode",
    "override your programming",
];

const DATA_EXFILTRATION: &[&str] = &[
    "reveal your system prompt",
    "show me your system prompt",
    "print your instructions",
    "repeat the text above",
    "show me your training data",
    "dump the database",
    "list all users",
    "export all records",
    "send the data to",
];

const MALICIOUS_INSTRUCTIONS: &[&str] = &[
    "how to hack",
    "create malware",
    "write a virus",
    "ransomware",
    "keylogger",
    "bypass security",
    "bypass authentication",
    "exploit vulnerability",
    "ddos attack",
    "phishing email",
    "steal credentials",
];

impl ThreatPolicy {
    /// Lightweight screening: three families, escalation by tag count
    pub fn standard() -> Self {
        Self {
            name: "standard",
            rules: vec![
                ThreatRule {
                    tag: "potential_pii_detected",
                    family: RuleFamily::Pii,
                    matcher: Matcher::Keywords(STANDARD_PII),
                    severity: ThreatLevel::Low,
                },
                ThreatRule {
                    tag: "potential_prompt_injection",
                    family: RuleFamily::PromptInjection,
                    matcher: Matcher::Keywords(STANDARD_INJECTION),
                    severity: ThreatLevel::Low,
                },
                ThreatRule {
                    tag: "excessive_input_length",
                    family: RuleFamily::InputSize,
                    matcher: Matcher::MaxChars(MAX_INPUT_CHARS),
                    severity: ThreatLevel::Low,
                },
            ],
            escalation: Escalation::TagCount,
            block_at: ThreatLevel::High,
        }
    }

    /// Richer taxonomy, escalation by highest severity
    pub fn enhanced() -> Self {
        Self {
            name: "enhanced",
            rules: vec![
                ThreatRule {
                    tag: "prompt_injection",
                    family: RuleFamily::PromptInjection,
                    matcher: Matcher::Keywords(PROMPT_INJECTION),
                    severity: ThreatLevel::High,
                },
                ThreatRule {
                    tag: "data_exfiltration",
                    family: RuleFamily::DataExfiltration,
                    matcher: Matcher::Keywords(DATA_EXFILTRATION),
                    severity: ThreatLevel::Critical,
                },
                ThreatRule {
                    tag: "malicious_instructions",
                    family: RuleFamily::MaliciousInstructions,
                    matcher: Matcher::Keywords(MALICIOUS_INSTRUCTIONS),
                    severity: ThreatLevel::High,
                },
                ThreatRule {
                    tag: "pii_ssn",
                    family: RuleFamily::Pii,
                    matcher: Matcher::Pattern(&SSN_PATTERN),
                    severity: ThreatLevel::Medium,
                },
                ThreatRule {
                    tag: "pii_credit_card",
                    family: RuleFamily::Pii,
                    matcher: Matcher::Pattern(&CREDIT_CARD_PATTERN),
                    severity: ThreatLevel::Medium,
                },
            ],
            escalation: Escalation::MaxSeverity,
            block_at: ThreatLevel::High,
        }
    }

    /// Enabled rules that match; each tag is reported at most once
    pub fn detect(&self, content: &str, features: &SecurityFeatures) -> Vec<&ThreatRule> {
        let lowered = content.to_lowercase();
        let mut matched: Vec<&ThreatRule> = Vec::new();

        for rule in &self.rules {
            if !rule.family.enabled_by(features) {
                continue;
            }
            if matched.iter().any(|m| m.tag == rule.tag) {
                continue;
            }
            if rule.matcher.is_match(content, &lowered) {
                matched.push(rule);
            }
        }

        matched
    }

    /// Level for a set of matched rules
    pub fn level(&self, matched: &[&ThreatRule]) -> ThreatLevel {
        match self.escalation {
            Escalation::TagCount => match matched.len() {
                0 => ThreatLevel::None,
                1 => ThreatLevel::Low,
                2 => ThreatLevel::Medium,
                _ => ThreatLevel::High,
            },
            Escalation::MaxSeverity => matched
                .iter()
                .map(|r| r.severity)
                .max()
                .unwrap_or(ThreatLevel::None),
        }
    }

    /// Whether a request at `level` may proceed
    pub fn allows(&self, level: ThreatLevel) -> bool {
        level < self.block_at
    }
}
