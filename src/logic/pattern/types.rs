//! Pattern Model Types
//!
//! Raw (on-disk) shapes for pattern set files, plus the severity model.
//! NO logic here - the compiled forms live in `registry`.

use serde::{Deserialize, Serialize};

// ============================================================================
// SEVERITY
// ============================================================================

/// Pattern-declared severity of a failure signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
            Severity::Info => "INFO",
        }
    }

    /// Ordering rank, higher = more severe
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 4,
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
            Severity::Info => 0,
        }
    }

    /// Case-insensitive parse. Unknown strings map to None so the loader
    /// can decide how to degrade.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "CRITICAL" => Some(Severity::Critical),
            "HIGH" => Some(Severity::High),
            "MEDIUM" => Some(Severity::Medium),
            "LOW" => Some(Severity::Low),
            "INFO" => Some(Severity::Info),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ON-DISK PATTERN SET SHAPES
// ============================================================================

/// One pattern set file, as parsed from disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSetFile {
    pub metadata: PatternSetMetadata,
    #[serde(default)]
    pub patterns: Vec<PatternDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSetMetadata {
    /// Identifies the set in analysis metadata (`patterns_used`)
    pub library_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// One failure signature, as authored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternDefinition {
    pub id: String,
    pub name: String,
    /// Free-form on disk; validated into `Severity` at load
    pub severity: String,
    pub primary_pattern: PrimaryPatternDefinition,
    #[serde(default)]
    pub secondary_patterns: Vec<SecondaryPatternDefinition>,
    #[serde(default)]
    pub sequence_patterns: Vec<SequencePatternDefinition>,
    #[serde(default)]
    pub context_extraction: Option<ContextExtractionRules>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimaryPatternDefinition {
    pub regex: String,
    /// Author-declared prior that this pattern indicates a real failure
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecondaryPatternDefinition {
    pub regex: String,
    pub weight: f64,
    /// Lines either side of the primary match to search
    pub proximity_window: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequencePatternDefinition {
    pub description: String,
    pub events: Vec<SequenceEventDefinition>,
    pub bonus_multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceEventDefinition {
    pub regex: String,
}

/// How much surrounding log to capture for a match.
/// `include_stack_trace` is accepted but carries no behavior yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextExtractionRules {
    #[serde(default)]
    pub lines_before: usize,
    #[serde(default)]
    pub lines_after: usize,
    #[serde(default)]
    pub include_stack_trace: bool,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parse_case_insensitive() {
        assert_eq!(Severity::parse("critical"), Some(Severity::Critical));
        assert_eq!(Severity::parse("High"), Some(Severity::High));
        assert_eq!(Severity::parse("MEDIUM"), Some(Severity::Medium));
        assert_eq!(Severity::parse("bogus"), None);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical.rank() > Severity::High.rank());
        assert!(Severity::High.rank() > Severity::Medium.rank());
        assert!(Severity::Medium.rank() > Severity::Low.rank());
        assert!(Severity::Low.rank() > Severity::Info.rank());
    }

    #[test]
    fn test_pattern_set_file_parse() {
        let json = r#"{
            "metadata": {"library_id": "jvm-core"},
            "patterns": [{
                "id": "jvm-oome",
                "name": "JVM out of memory",
                "severity": "HIGH",
                "primary_pattern": {"regex": "OutOfMemoryError", "confidence": 0.9},
                "secondary_patterns": [
                    {"regex": "GC overhead", "weight": 0.5, "proximity_window": 20}
                ]
            }]
        }"#;

        let set: PatternSetFile = serde_json::from_str(json).unwrap();
        assert_eq!(set.metadata.library_id, "jvm-core");
        assert_eq!(set.patterns.len(), 1);

        let p = &set.patterns[0];
        assert_eq!(p.id, "jvm-oome");
        assert_eq!(p.primary_pattern.confidence, 0.9);
        assert_eq!(p.secondary_patterns.len(), 1);
        assert!(p.sequence_patterns.is_empty());
        assert!(p.context_extraction.is_none());
    }
}
