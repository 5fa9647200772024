//! Router tests module
//!
//! Covers telemetry smoothing, scoring and provider selection.
