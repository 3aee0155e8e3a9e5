//! Context Scorer
//!
//! Weights a match by what the surrounding log lines look like. Two
//! interchangeable variants, selected at configuration time:
//!
//! - `RegexClasses`: counts severity markers, stack frames and exception
//!   names via fixed regex classes; capped, with a density penalty so a
//!   wall of errors does not drown out the signal.
//! - `Keywords`: sums configured keyword weights over the context lines;
//!   uncapped.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::logic::analysis::types::EventContext;
use super::keywords::KeywordWeights;

// ============================================================================
// VARIANT SELECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextVariant {
    /// Fixed regex classes over severity markers / stack frames / exceptions
    RegexClasses,
    /// Configured keyword weights, substring containment
    Keywords,
}

// ============================================================================
// REGEX CLASSES (variant A)
// ============================================================================

static ERROR_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(ERROR|FATAL|CRITICAL|SEVERE)\b").unwrap());

static WARNING_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(WARN|WARNING)\b").unwrap());

static STACK_FRAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*at\s+[\w.$]+\(.*\)\s*$").unwrap());

static EXCEPTION_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w*Exception\b|\b\w*Error\b").unwrap());

const ERROR_LINE_SCORE: f64 = 0.4;
const WARNING_LINE_SCORE: f64 = 0.2;
const STACK_FRAME_SCORE: f64 = 0.1;
const EXCEPTION_SCORE: f64 = 0.3;

/// Extra credit for a visible stack trace, bounded
const STACK_TRACE_BONUS_CAP: f64 = 0.5;

/// Above this many context lines the density penalty can apply
const DENSITY_MIN_LINES: usize = 10;

/// Error/stack density beyond which the context is mostly noise
const DENSITY_RATIO: f64 = 0.7;

const DENSITY_PENALTY: f64 = 0.8;

// ============================================================================
// ENTRY POINT
// ============================================================================

/// Context factor for one matched event. Neutral (1.0) when there is
/// nothing to analyze.
pub fn context_factor(
    context: &EventContext,
    variant: ContextVariant,
    keywords: &KeywordWeights,
    max_context_factor: f64,
) -> f64 {
    let lines = context.all_lines();
    if lines.is_empty() {
        return 1.0;
    }

    match variant {
        ContextVariant::RegexClasses => regex_class_factor(&lines, max_context_factor),
        ContextVariant::Keywords => keyword_factor(&lines, keywords),
    }
}

fn regex_class_factor(lines: &[&str], max_context_factor: f64) -> f64 {
    let mut score = 0.0;
    let mut error_lines = 0usize;
    let mut warning_lines = 0usize;
    let mut stack_trace_lines = 0usize;
    let mut exception_lines = 0usize;

    for line in lines {
        if ERROR_MARKERS.is_match(line) {
            score += ERROR_LINE_SCORE;
            error_lines += 1;
        } else if WARNING_MARKERS.is_match(line) {
            score += WARNING_LINE_SCORE;
            warning_lines += 1;
        }

        if STACK_FRAME.is_match(line) {
            score += STACK_FRAME_SCORE;
            stack_trace_lines += 1;
        }

        if EXCEPTION_NAME.is_match(line) {
            score += EXCEPTION_SCORE;
            exception_lines += 1;
        }
    }

    score += (stack_trace_lines as f64 * 0.1).min(STACK_TRACE_BONUS_CAP);

    // A context that is almost entirely errors carries less signal per line
    let total = lines.len();
    if total > DENSITY_MIN_LINES
        && (error_lines + stack_trace_lines) as f64 > DENSITY_RATIO * total as f64
    {
        score *= DENSITY_PENALTY;
    }

    tracing::debug!(
        "Context classes: {} error, {} warning, {} stack, {} exception lines -> score {:.3}",
        error_lines,
        warning_lines,
        stack_trace_lines,
        exception_lines,
        score
    );

    (1.0 + score).min(max_context_factor)
}

/// Keyword weights summed once per containing line, case-sensitive
/// substring containment.
fn keyword_factor(lines: &[&str], keywords: &KeywordWeights) -> f64 {
    if keywords.is_empty() {
        return 1.0;
    }

    let mut total_weight = 0.0;
    for line in lines {
        for (keyword, weight) in keywords.iter() {
            if line.contains(keyword) {
                total_weight += weight;
            }
        }
    }

    1.0 + total_weight
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn context(before: &[&str], matched: &str, after: &[&str]) -> EventContext {
        EventContext {
            lines_before: before.iter().map(|s| s.to_string()).collect(),
            matched_line: matched.to_string(),
            lines_after: after.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_plain_lines_are_neutral() {
        let ctx = context(&["starting up"], "all good", &["still fine"]);
        let f = context_factor(
            &ctx,
            ContextVariant::RegexClasses,
            &KeywordWeights::default(),
            2.5,
        );
        assert_eq!(f, 1.0);
    }

    #[test]
    fn test_error_and_exception_classes_stack() {
        // One line hitting both the ERROR marker and an exception name:
        // 0.4 + 0.3 = 0.7
        let ctx = context(&[], "ERROR java.lang.OutOfMemoryError: heap", &[]);
        let f = context_factor(
            &ctx,
            ContextVariant::RegexClasses,
            &KeywordWeights::default(),
            2.5,
        );
        assert!((f - 1.7).abs() < 1e-9);
    }

    #[test]
    fn test_warning_only_when_not_error() {
        let ctx = context(&[], "WARN disk nearly full", &[]);
        let f = context_factor(
            &ctx,
            ContextVariant::RegexClasses,
            &KeywordWeights::default(),
            2.5,
        );
        assert!((f - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_stack_trace_bonus_is_capped() {
        // 8 stack frames: per-line 8 * 0.1 plus bonus capped at 0.5
        let frames: Vec<String> = (0..8)
            .map(|i| format!("    at com.example.Service.call(Service.java:{})", i))
            .collect();
        let frame_refs: Vec<&str> = frames.iter().map(|s| s.as_str()).collect();
        let ctx = context(&frame_refs, "plain line", &[]);

        let f = context_factor(
            &ctx,
            ContextVariant::RegexClasses,
            &KeywordWeights::default(),
            10.0,
        );
        // 8 * 0.1 + 0.5 = 1.3
        assert!((f - 2.3).abs() < 1e-9);
    }

    #[test]
    fn test_density_penalty_applies_before_cap() {
        // 12 lines, 10 of them ERROR: density 10/12 > 0.7
        let errors: Vec<String> = (0..10).map(|i| format!("ERROR failure {}", i)).collect();
        let error_refs: Vec<&str> = errors.iter().map(|s| s.as_str()).collect();
        let ctx = context(&error_refs, "plain", &["also plain"]);

        let f = context_factor(
            &ctx,
            ContextVariant::RegexClasses,
            &KeywordWeights::default(),
            100.0,
        );
        // 10 * 0.4 = 4.0, penalized to 3.2
        assert!((f - 4.2).abs() < 1e-9);
    }

    #[test]
    fn test_factor_is_capped() {
        let errors: Vec<String> = (0..5).map(|i| format!("FATAL broken {}", i)).collect();
        let error_refs: Vec<&str> = errors.iter().map(|s| s.as_str()).collect();
        let ctx = context(&error_refs, "FATAL core", &[]);

        let f = context_factor(
            &ctx,
            ContextVariant::RegexClasses,
            &KeywordWeights::default(),
            2.5,
        );
        assert_eq!(f, 2.5);
    }

    #[test]
    fn test_keyword_weights_sum_per_containing_line() {
        let keywords = KeywordWeights::from_pairs(&[("OutOfMemoryError", 0.9), ("heap", 0.3)]);
        let ctx = context(
            &["heap usage climbing"],
            "java.lang.OutOfMemoryError: Java heap space",
            &[],
        );

        let f = context_factor(&ctx, ContextVariant::Keywords, &keywords, 2.5);
        // line 1: heap (0.3); line 2: OutOfMemoryError + heap (1.2)
        assert!((f - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_keyword_matching_is_case_sensitive() {
        let keywords = KeywordWeights::from_pairs(&[("Timeout", 0.5)]);
        let ctx = context(&[], "request timeout after 30s", &[]);

        let f = context_factor(&ctx, ContextVariant::Keywords, &keywords, 2.5);
        assert_eq!(f, 1.0);
    }

    #[test]
    fn test_keyword_variant_without_keywords_is_neutral() {
        let ctx = context(&[], "ERROR everything is on fire", &[]);
        let f = context_factor(
            &ctx,
            ContextVariant::Keywords,
            &KeywordWeights::default(),
            2.5,
        );
        assert_eq!(f, 1.0);
    }

    #[test]
    fn test_keyword_variant_is_uncapped() {
        let keywords = KeywordWeights::from_pairs(&[("boom", 2.0)]);
        let ctx = context(&["boom", "boom"], "boom", &["boom"]);

        let f = context_factor(&ctx, ContextVariant::Keywords, &keywords, 2.5);
        assert_eq!(f, 9.0);
    }
}
