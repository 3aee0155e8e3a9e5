//! Proximity Scorer
//!
//! Secondary patterns found near the primary match raise confidence that
//! the primary is a real failure and not a stray string. Each secondary
//! contributes its weight scaled by exponential decay over the line
//! distance to its closest match.

use crate::logic::pattern::SecondaryPattern;
use super::rules::ScoringConfig;

/// `1.0 + sum(weight * exp(-d / decay_constant))` over all secondaries that
/// match within their window. No secondaries, or none found, means 1.0.
pub fn proximity_factor(
    secondaries: &[SecondaryPattern],
    primary_index: usize,
    lines: &[&str],
    config: &ScoringConfig,
) -> f64 {
    if secondaries.is_empty() {
        return 1.0;
    }

    let mut total_bonus = 0.0;

    for secondary in secondaries {
        if let Some(distance) = closest_match_distance(secondary, primary_index, lines, config) {
            let decay = (-(distance as f64) / config.proximity_decay_constant).exp();
            let contribution = secondary.weight * decay;
            total_bonus += contribution;

            tracing::debug!(
                "Secondary '{}' at distance {} from line {}, contribution {:.4}",
                secondary.regex.as_str(),
                distance,
                primary_index + 1,
                contribution
            );
        }
    }

    1.0 + total_bonus
}

/// Smallest line distance at which `secondary` matches inside its window,
/// skipping the primary line itself. None when nothing matches.
fn closest_match_distance(
    secondary: &SecondaryPattern,
    primary_index: usize,
    lines: &[&str],
    config: &ScoringConfig,
) -> Option<usize> {
    let window = secondary.proximity_window.min(config.proximity_max_window);
    let start = primary_index.saturating_sub(window);
    let end = lines.len().min(primary_index + window + 1);

    let mut closest: Option<usize> = None;
    for (index, line) in lines.iter().enumerate().take(end).skip(start) {
        if index == primary_index {
            continue;
        }
        if secondary.regex.is_match(line) {
            let distance = index.abs_diff(primary_index);
            if closest.map_or(true, |c| distance < c) {
                closest = Some(distance);
            }
        }
    }

    closest
}

// ============================================================================
// TESTS
// ============================================================================
