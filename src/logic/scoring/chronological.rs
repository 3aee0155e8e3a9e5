//! Chronological Scorer
//!
//! Weights a match by its relative position in the log. Failures that show
//! up early are usually closer to the root cause than the cascade that
//! follows them, so early lines are boosted and late lines are discounted.

use super::rules::ScoringConfig;

/// Position-in-log factor for a 1-based line number.
///
/// With the default thresholds (E = 0.2, M = 2.5, T = 0.5):
/// - position < E: linear ramp from M down to 1.5 at E
/// - E <= position < T: linear ramp from 1.5 down to 1.0 at T
/// - position >= T: 0.5 + (1.0 - position), bottoming out at 0.5
///
/// A log with no lines cannot place the match, so the factor is neutral.
pub fn chronological_factor(line_number: usize, total_lines: usize, config: &ScoringConfig) -> f64 {
    if total_lines == 0 {
        return 1.0;
    }

    let position = line_number as f64 / total_lines as f64;
    let early = config.chrono_early_threshold;
    let max_bonus = config.chrono_max_early_bonus;
    let penalty = config.chrono_penalty_threshold;

    if position < early {
        1.5 + (early - position) * (max_bonus - 1.5) / early
    } else if position < penalty {
        1.0 + (penalty - position) * 0.5 / (penalty - early)
    } else {
        0.5 + (1.0 - position)
    }
}

// ============================================================================
// TESTS
// ============================================================================
