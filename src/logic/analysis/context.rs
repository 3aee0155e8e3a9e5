//! Context Extractor
//!
//! Captures the log lines surrounding a primary match, per the matched
//! pattern's extraction rules. Patterns without rules get the matched line
//! alone.

use crate::logic::pattern::ContextExtractionRules;
use super::types::EventContext;

/// Build the `EventContext` for a match at `match_index` (0-based).
pub fn extract_context(
    lines: &[&str],
    match_index: usize,
    rules: Option<&ContextExtractionRules>,
) -> EventContext {
    let matched_line = lines.get(match_index).copied().unwrap_or("").to_string();

    let rules = match rules {
        Some(rules) => rules,
        None => {
            return EventContext {
                lines_before: Vec::new(),
                matched_line,
                lines_after: Vec::new(),
            }
        }
    };

    let before_start = match_index.saturating_sub(rules.lines_before);
    let lines_before = lines[before_start..match_index]
        .iter()
        .map(|l| l.to_string())
        .collect();

    let after_end = lines.len().min(match_index + 1 + rules.lines_after);
    let after_start = (match_index + 1).min(after_end);
    let lines_after = lines[after_start..after_end]
        .iter()
        .map(|l| l.to_string())
        .collect();

    EventContext {
        lines_before,
        matched_line,
        lines_after,
    }
}

// ============================================================================
// TESTS
// ============================================================================
