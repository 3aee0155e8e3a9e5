//! Analysis Engine
//!
//! The orchestrator: splits the captured log into lines, scans every line
//! against every loaded pattern, extracts context and scores each hit, and
//! assembles the final `AnalysisResult`. One invocation is fully
//! sequential and deterministic; the only cross-invocation state is the
//! frequency tracker.

use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

use crate::logic::pattern::PatternRegistry;
use crate::logic::scoring::{
    calculate_score, FrequencyTracker, KeywordWeights, ScoringConfig,
};

use super::context::extract_context;
use super::types::{
    AnalysisMetadata, AnalysisResult, AnalysisSummary, MatchedEvent, PatternSummary,
};

// ============================================================================
// ENGINE
// ============================================================================

pub struct AnalysisEngine {
    registry: PatternRegistry,
    config: ScoringConfig,
    keywords: KeywordWeights,
    frequency: FrequencyTracker,
}

impl AnalysisEngine {
    pub fn new(
        registry: PatternRegistry,
        config: ScoringConfig,
        keywords: KeywordWeights,
    ) -> Self {
        let frequency = FrequencyTracker::new(&config);
        Self {
            registry,
            config,
            keywords,
            frequency,
        }
    }

    pub fn frequency(&self) -> &FrequencyTracker {
        &self.frequency
    }

    /// Analyze one captured log. Matches are discovered line-ascending,
    /// then in registry order within a line; events keep that order.
    pub fn analyze(&self, logs: &str) -> AnalysisResult {
        let started = Instant::now();
        let lines = split_log_lines(logs);
        let mut events = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            for set in self.registry.sets() {
                for pattern in &set.patterns {
                    if !pattern.primary.regex.is_match(line) {
                        continue;
                    }

                    tracing::debug!(
                        "Line {}: match for pattern '{}'",
                        index + 1,
                        pattern.name
                    );

                    let context =
                        extract_context(&lines, index, pattern.context_extraction.as_ref());
                    let score = calculate_score(
                        pattern,
                        index + 1,
                        &lines,
                        &context,
                        &self.config,
                        &self.keywords,
                        &self.frequency,
                    );

                    // Recorded after scoring so a match never penalizes itself
                    self.frequency.record(&pattern.id);

                    events.push(MatchedEvent {
                        line_number: index + 1,
                        matched_pattern: PatternSummary::from(pattern.as_ref()),
                        context,
                        score,
                    });
                }
            }
        }

        let summary = AnalysisSummary::from_events(&events);
        let metadata = AnalysisMetadata {
            processing_time_ms: started.elapsed().as_millis() as u64,
            total_lines: lines.len(),
            analyzed_at: Utc::now().to_rfc3339(),
            patterns_used: self.patterns_used(),
        };

        AnalysisResult {
            analysis_id: Uuid::new_v4(),
            events,
            metadata,
            summary,
        }
    }

    /// `library_id`s of sets that contributed at least one loaded pattern,
    /// in registry order, deduplicated.
    fn patterns_used(&self) -> Vec<String> {
        let mut used = Vec::new();
        for set in self.registry.sets() {
            if !set.patterns.is_empty() && !used.contains(&set.library_id) {
                used.push(set.library_id.clone());
            }
        }
        used
    }
}

// ============================================================================
// LINE SPLITTING
// ============================================================================

/// Split captured logs on `\r?\n`, dropping trailing empty segments the way
/// the supervisor's own tooling does. An entirely empty capture still
/// counts as one (empty) line.
pub fn split_log_lines(logs: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = logs
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() && logs.is_empty() {
        lines.push("");
    }

    lines
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_lines() {
        assert_eq!(split_log_lines("a\nb\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_drops_trailing_newline() {
        assert_eq!(split_log_lines("a\nb\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_split_handles_crlf() {
        assert_eq!(split_log_lines("a\r\nb\r\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_split_keeps_interior_empty_lines() {
        assert_eq!(split_log_lines("a\n\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_split_empty_input_is_one_empty_line() {
        assert_eq!(split_log_lines(""), vec![""]);
    }

    #[test]
    fn test_split_newline_only_is_zero_lines() {
        assert!(split_log_lines("\n").is_empty());
        assert!(split_log_lines("\r\n\r\n").is_empty());
    }
}
