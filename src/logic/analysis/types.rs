//! Analysis Types
//!
//! Request payload and result model for one analysis invocation.
//! NO logic here - the orchestrator lives in `engine`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::pattern::{Pattern, Severity};

// ============================================================================
// REQUEST PAYLOAD
// ============================================================================

/// Evidence gathered from a failed pod, as posted by the supervisor
#[derive(Debug, Clone, Deserialize)]
pub struct PodFailureData {
    #[serde(default)]
    pub pod: Option<PodRef>,
    #[serde(default)]
    pub logs: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PodRef {
    #[serde(default)]
    pub metadata: PodMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PodMetadata {
    #[serde(default)]
    pub name: String,
}

// ============================================================================
// MATCHED EVENTS
// ============================================================================

/// The log lines surrounding a primary match
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventContext {
    pub lines_before: Vec<String>,
    pub matched_line: String,
    pub lines_after: Vec<String>,
}

impl EventContext {
    /// Before + matched + after, in log order
    pub fn all_lines(&self) -> Vec<&str> {
        let mut lines = Vec::with_capacity(self.lines_before.len() + 1 + self.lines_after.len());
        lines.extend(self.lines_before.iter().map(String::as_str));
        lines.push(self.matched_line.as_str());
        lines.extend(self.lines_after.iter().map(String::as_str));
        lines
    }
}

/// What the response carries about the pattern behind a match
#[derive(Debug, Clone, Serialize)]
pub struct PatternSummary {
    pub id: String,
    pub name: String,
    pub severity: Severity,
}

impl From<&Pattern> for PatternSummary {
    fn from(pattern: &Pattern) -> Self {
        Self {
            id: pattern.id.clone(),
            name: pattern.name.clone(),
            severity: pattern.severity,
        }
    }
}

/// One primary-pattern hit, with context and its final score
#[derive(Debug, Clone, Serialize)]
pub struct MatchedEvent {
    /// 1-based
    pub line_number: usize,
    pub matched_pattern: PatternSummary,
    pub context: EventContext,
    pub score: f64,
}

// ============================================================================
// RESULT
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    pub analysis_id: Uuid,
    pub events: Vec<MatchedEvent>,
    pub metadata: AnalysisMetadata,
    pub summary: AnalysisSummary,
}

#[derive(Debug, Serialize)]
pub struct AnalysisMetadata {
    pub processing_time_ms: u64,
    pub total_lines: usize,
    /// RFC 3339 timestamp of when the analysis ran
    pub analyzed_at: String,
    /// `library_id`s of the pattern sets consulted, in registry order
    pub patterns_used: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisSummary {
    pub significant_events: usize,
    /// Highest severity seen, or "NONE" when nothing matched
    pub highest_severity: String,
    pub severity_distribution: HashMap<String, usize>,
}

impl AnalysisSummary {
    pub fn from_events(events: &[MatchedEvent]) -> Self {
        let mut distribution: HashMap<String, usize> = HashMap::new();
        let mut highest: Option<Severity> = None;

        for event in events {
            let severity = event.matched_pattern.severity;
            *distribution.entry(severity.as_str().to_string()).or_insert(0) += 1;
            if highest.map_or(true, |h| severity.rank() > h.rank()) {
                highest = Some(severity);
            }
        }

        Self {
            significant_events: events.len(),
            highest_severity: highest.map_or("NONE".to_string(), |h| h.as_str().to_string()),
            severity_distribution: distribution,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
