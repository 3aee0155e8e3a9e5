//! Scoring Rules & Thresholds
//!
//! Constants and configuration for the scoring pipeline.
//! NO scoring logic here - just the knobs each factor reads.

use serde::{Deserialize, Serialize};

use crate::logic::pattern::Severity;
use super::context::ContextVariant;

// ============================================================================
// SEVERITY MULTIPLIERS
// ============================================================================

/// Coarse amplification per pattern-declared severity
pub fn severity_multiplier(severity: Severity) -> f64 {
    match severity {
        Severity::Critical => 5.0,
        Severity::High => 3.0,
        Severity::Medium => 2.0,
        Severity::Low => 1.5,
        Severity::Info => 1.0,
    }
}

// ============================================================================
// DEFAULTS (constants - the config mirrors these)
// ============================================================================

/// Denominator in the proximity decay `exp(-d / c)`
pub const DEFAULT_DECAY_CONSTANT: f64 = 10.0;

/// Hard cap on any secondary pattern's search window
pub const DEFAULT_MAX_WINDOW: usize = 100;

/// Relative positions below this get the early bonus
pub const DEFAULT_EARLY_THRESHOLD: f64 = 0.2;

/// Chronological factor at position 0
pub const DEFAULT_MAX_EARLY_BONUS: f64 = 2.5;

/// Relative positions at or past this get penalized
pub const DEFAULT_PENALTY_THRESHOLD: f64 = 0.5;

/// Cap for the regex-class context factor
pub const DEFAULT_MAX_CONTEXT_FACTOR: f64 = 2.5;

/// Hourly match rate above which the frequency penalty kicks in
pub const DEFAULT_FREQUENCY_THRESHOLD: f64 = 10.0;

/// Upper bound on the frequency penalty
pub const DEFAULT_FREQUENCY_MAX_PENALTY: f64 = 0.8;

/// Sliding window length for frequency tracking
pub const DEFAULT_FREQUENCY_WINDOW_HOURS: u64 = 1;

// ============================================================================
// SCORING CONFIG
// ============================================================================

/// All scoring knobs in one place. Each factor reads only its own fields,
/// so a factor can be neutralized through configuration without touching
/// the pipeline (e.g. a frequency threshold above any realistic rate).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Proximity: decay constant `c` in `exp(-d / c)`
    pub proximity_decay_constant: f64,
    /// Proximity: hard cap on per-secondary search windows
    pub proximity_max_window: usize,

    /// Chronological: positions below this get the early bonus
    pub chrono_early_threshold: f64,
    /// Chronological: factor at the very first line
    pub chrono_max_early_bonus: f64,
    /// Chronological: positions at or past this get penalized
    pub chrono_penalty_threshold: f64,

    /// Which context scorer variant is active
    pub context_variant: ContextVariant,
    /// Cap for the regex-class context factor (keyword variant is uncapped)
    pub max_context_factor: f64,

    /// Frequency: hourly rate at or below which there is no penalty
    pub frequency_threshold: f64,
    /// Frequency: penalty upper bound
    pub frequency_max_penalty: f64,
    /// Frequency: sliding window length in hours
    pub frequency_window_hours: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            proximity_decay_constant: DEFAULT_DECAY_CONSTANT,
            proximity_max_window: DEFAULT_MAX_WINDOW,
            chrono_early_threshold: DEFAULT_EARLY_THRESHOLD,
            chrono_max_early_bonus: DEFAULT_MAX_EARLY_BONUS,
            chrono_penalty_threshold: DEFAULT_PENALTY_THRESHOLD,
            context_variant: ContextVariant::Keywords,
            max_context_factor: DEFAULT_MAX_CONTEXT_FACTOR,
            frequency_threshold: DEFAULT_FREQUENCY_THRESHOLD,
            frequency_max_penalty: DEFAULT_FREQUENCY_MAX_PENALTY,
            frequency_window_hours: DEFAULT_FREQUENCY_WINDOW_HOURS,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
