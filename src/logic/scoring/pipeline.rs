//! Scoring Pipeline
//!
//! Combines the per-factor scorers into the final score for one matched
//! event:
//!
//! ```text
//! score = base_confidence
//!       x severity_multiplier
//!       x chronological_factor
//!       x proximity_factor
//!       x temporal_factor
//!       x context_factor
//!       x (1 - frequency_penalty)
//! ```
//!
//! Each factor is computed by its own module and any factor that comes back
//! NaN is replaced with its neutral value, so the pipeline never emits NaN.
//! The final score is intentionally uncapped.

use crate::logic::analysis::types::EventContext;
use crate::logic::pattern::Pattern;

use super::chronological::chronological_factor;
use super::context::context_factor;
use super::frequency::FrequencyTracker;
use super::keywords::KeywordWeights;
use super::proximity::proximity_factor;
use super::rules::{severity_multiplier, ScoringConfig};
use super::sequence::temporal_factor;

/// Score one matched event. `line_number` is 1-based; `lines` is the full
/// log the match came from.
#[allow(clippy::too_many_arguments)]
pub fn calculate_score(
    pattern: &Pattern,
    line_number: usize,
    lines: &[&str],
    context: &EventContext,
    config: &ScoringConfig,
    keywords: &KeywordWeights,
    frequency: &FrequencyTracker,
) -> f64 {
    let primary_index = line_number.saturating_sub(1);

    let base_confidence = pattern.primary.confidence;
    let severity = severity_multiplier(pattern.severity);

    let chronological = neutral_if_nan(
        chronological_factor(line_number, lines.len(), config),
        1.0,
    );
    let proximity = neutral_if_nan(
        proximity_factor(&pattern.secondaries, primary_index, lines, config),
        1.0,
    );
    let temporal = neutral_if_nan(
        temporal_factor(&pattern.sequences, primary_index, lines),
        1.0,
    );
    let context = neutral_if_nan(
        context_factor(context, config.context_variant, keywords, config.max_context_factor),
        1.0,
    );
    let penalty = neutral_if_nan(frequency.penalty(&pattern.id), 0.0);

    tracing::debug!(
        "Pattern '{}': confidence={}, severity={}, chronological={:.3}, proximity={:.3}, temporal={:.3}, context={:.3}, frequency_penalty={:.3}",
        pattern.name,
        base_confidence,
        severity,
        chronological,
        proximity,
        temporal,
        context,
        penalty
    );

    base_confidence * severity * chronological * proximity * temporal * context * (1.0 - penalty)
}

fn neutral_if_nan(value: f64, neutral: f64) -> f64 {
    if value.is_nan() {
        neutral
    } else {
        value
    }
}

// ============================================================================
// TESTS
// ============================================================================
