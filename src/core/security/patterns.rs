//! Structural PII patterns
//!
//! Pre-compiled regexes used by the enhanced threat profile.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches nothing; stands in for a pattern that failed to compile
fn never_matches() -> Regex {
    // [^\s\S] is the empty character class
    Regex::new(r"[^\s\S]").unwrap_or_else(|_| unreachable!("empty class is a valid regex"))
}

/// SSN pattern: XXX-XX-XXXX
pub static SSN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").unwrap_or_else(|e| {
        tracing::error!("Failed to compile SSN regex: {}", e);
        never_matches()
    })
});

/// Credit card pattern: XXXX-XXXX-XXXX-XXXX or XXXXXXXXXXXXXXXX
pub static CREDIT_CARD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{4}[\s-]?\d{4}[\s-]?\d{4}[\s-]?\d{4}\b").unwrap_or_else(|e| {
        tracing::error!("Failed to compile credit card regex: {}", e);
        never_matches()
    })
});
