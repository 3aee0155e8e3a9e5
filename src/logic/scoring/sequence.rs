//! Sequence Scorer (temporal factor)
//!
//! A sequence pattern describes an ordered chain of events that should
//! appear in the log, culminating at or near the primary match. Matching
//! works backwards: the final event must land within a small window around
//! the primary line, then each earlier event must be found on some line
//! before the one already located.

use crate::logic::pattern::SequencePattern;

/// Lines either side of the primary match the final sequence event may
/// land on
const FINAL_EVENT_WINDOW: usize = 5;

/// `1.0 + sum(bonus_multiplier)` over all sequences that match.
/// Zero sequences means 1.0.
pub fn temporal_factor(
    sequences: &[SequencePattern],
    primary_index: usize,
    lines: &[&str],
) -> f64 {
    if sequences.is_empty() {
        return 1.0;
    }

    let mut total_bonus = 0.0;
    for sequence in sequences {
        if sequence_matched(sequence, primary_index, lines) {
            total_bonus += sequence.bonus_multiplier;
            tracing::debug!(
                "Sequence '{}' matched at line {}, bonus {}",
                sequence.description,
                primary_index + 1,
                sequence.bonus_multiplier
            );
        }
    }

    1.0 + total_bonus
}

fn sequence_matched(sequence: &SequencePattern, primary_index: usize, lines: &[&str]) -> bool {
    let events = &sequence.events;
    if events.is_empty() {
        return false;
    }

    // The final event must appear near the primary match. The backward scan
    // then anchors at the primary index itself, not at the line the final
    // event was found on.
    if !final_event_near_primary(&events[events.len() - 1], primary_index, lines) {
        return false;
    }
    let mut cursor = primary_index;

    for event in events[..events.len() - 1].iter().rev() {
        match find_before(event, cursor, lines) {
            Some(index) => cursor = index,
            None => return false,
        }
    }

    true
}

fn final_event_near_primary(event: &regex::Regex, primary_index: usize, lines: &[&str]) -> bool {
    let start = primary_index.saturating_sub(FINAL_EVENT_WINDOW);
    let end = lines.len().min(primary_index + FINAL_EVENT_WINDOW + 1);
    lines[start..end].iter().any(|line| event.is_match(line))
}

/// Scan backwards for `event` strictly before `before_index`
fn find_before(event: &regex::Regex, before_index: usize, lines: &[&str]) -> Option<usize> {
    lines[..before_index]
        .iter()
        .rposition(|line| event.is_match(line))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn sequence(events: &[&str], bonus: f64) -> SequencePattern {
        SequencePattern {
            description: "test sequence".to_string(),
            events: events.iter().map(|e| Regex::new(e).unwrap()).collect(),
            bonus_multiplier: bonus,
        }
    }

    #[test]
    fn test_no_sequences_is_neutral() {
        let lines = vec!["a"];
        assert_eq!(temporal_factor(&[], 0, &lines), 1.0);
    }

    #[test]
    fn test_ordered_chain_matches() {
        let lines = vec![
            "connection pool exhausted",
            "retrying database connection",
            "filler",
            "transaction rolled back",
            "FATAL: service shutting down",
        ];
        let sequences = [sequence(
            &["pool exhausted", "rolled back", "shutting down"],
            2.0,
        )];

        assert_eq!(temporal_factor(&sequences, 4, &lines), 3.0);
    }

    #[test]
    fn test_out_of_order_chain_fails() {
        let lines = vec![
            "transaction rolled back",
            "connection pool exhausted",
            "FATAL: service shutting down",
        ];
        // Chain requires pool exhaustion before the rollback
        let sequences = [sequence(
            &["pool exhausted", "rolled back", "shutting down"],
            2.0,
        )];

        assert_eq!(temporal_factor(&sequences, 2, &lines), 1.0);
    }

    #[test]
    fn test_final_event_window_is_clamped_and_inclusive() {
        // Final event 5 lines after the primary still counts
        let mut lines = vec![""; 12];
        lines[3] = "primary boom";
        lines[8] = "final marker";
        let sequences = [sequence(&["final marker"], 0.5)];
        assert_eq!(temporal_factor(&sequences, 3, &lines), 1.5);

        // 6 lines away does not
        let mut lines = vec![""; 12];
        lines[3] = "primary boom";
        lines[9] = "final marker";
        assert_eq!(temporal_factor(&sequences, 3, &lines), 1.0);
    }

    #[test]
    fn test_backward_scan_starts_at_primary() {
        // The final event matches 4 lines after the primary, but the scan
        // for earlier events anchors at the primary index: an "earlier"
        // event located between the primary and the final event's actual
        // line must NOT satisfy the chain.
        let lines = vec![
            "filler",        // 0
            "primary boom",  // 1  <- primary
            "first step",    // 2  (after the anchor - must not count)
            "filler",        // 3
            "final marker",  // 4
        ];
        let sequences = [sequence(&["first step", "final marker"], 1.0)];
        assert_eq!(temporal_factor(&sequences, 1, &lines), 1.0);

        // Move the first step before the primary and the chain holds.
        let lines = vec![
            "first step",    // 0
            "primary boom",  // 1  <- primary
            "filler",        // 2
            "filler",        // 3
            "final marker",  // 4
        ];
        assert_eq!(temporal_factor(&sequences, 1, &lines), 2.0);
    }

    #[test]
    fn test_multiple_sequences_sum_bonuses() {
        let lines = vec!["step one", "step two", "primary boom"];
        let sequences = [
            sequence(&["step one", "boom"], 1.0),
            sequence(&["step two", "boom"], 0.5),
        ];
        assert_eq!(temporal_factor(&sequences, 2, &lines), 2.5);
    }

    #[test]
    fn test_missing_early_event_fails() {
        let lines = vec!["filler", "primary boom"];
        let sequences = [sequence(&["never appears", "boom"], 1.0)];
        assert_eq!(temporal_factor(&sequences, 1, &lines), 1.0);
    }
}
