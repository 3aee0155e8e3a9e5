//! Pattern Registry
//!
//! Loads pattern set files from a directory, validates them, and compiles
//! every regex exactly once. The raw serde shapes never reach the hot path:
//! scanning and scoring only ever see the compiled forms below.
//!
//! Loading is tolerant: an unparseable file or an invalid regex invalidates
//! only the file/pattern it belongs to. The registry is fatal only when
//! nothing at all could be loaded.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use regex::Regex;

use super::types::{
    ContextExtractionRules, PatternDefinition, PatternSetFile, Severity,
};

// ============================================================================
// COMPILED MODEL
// ============================================================================

/// A loaded pattern set: one source file, regexes compiled
#[derive(Debug)]
pub struct PatternSet {
    pub library_id: String,
    pub patterns: Vec<Arc<Pattern>>,
}

/// A loaded failure signature
#[derive(Debug)]
pub struct Pattern {
    pub id: String,
    pub name: String,
    pub severity: Severity,
    pub primary: PrimaryPattern,
    pub secondaries: Vec<SecondaryPattern>,
    pub sequences: Vec<SequencePattern>,
    pub context_extraction: Option<ContextExtractionRules>,
}

#[derive(Debug)]
pub struct PrimaryPattern {
    pub regex: Regex,
    pub confidence: f64,
}

#[derive(Debug)]
pub struct SecondaryPattern {
    pub regex: Regex,
    pub weight: f64,
    pub proximity_window: usize,
}

#[derive(Debug)]
pub struct SequencePattern {
    pub description: String,
    /// Ordered; the last event must land near the primary match
    pub events: Vec<Regex>,
    pub bonus_multiplier: f64,
}

// ============================================================================
// LOAD ERROR
// ============================================================================

#[derive(Debug)]
pub enum PatternLoadError {
    /// Directory walk failed outright
    Io(PathBuf, std::io::Error),
    /// Nothing usable was found - the service cannot analyze anything
    NoPatternsLoaded(PathBuf),
}

impl std::fmt::Display for PatternLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternLoadError::Io(path, err) => {
                write!(f, "failed to read pattern directory {}: {}", path.display(), err)
            }
            PatternLoadError::NoPatternsLoaded(path) => {
                write!(f, "no patterns loaded from {}", path.display())
            }
        }
    }
}

impl std::error::Error for PatternLoadError {}

// ============================================================================
// REGISTRY
// ============================================================================

/// Immutable snapshot of all loaded pattern sets
#[derive(Debug)]
pub struct PatternRegistry {
    sets: Vec<PatternSet>,
}

impl PatternRegistry {
    /// Load every `*.json` pattern set under `dir` (recursive, sorted path
    /// order so load order is deterministic across platforms).
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, PatternLoadError> {
        let dir = dir.as_ref();
        let mut files = Vec::new();
        collect_json_files(dir, &mut files)
            .map_err(|e| PatternLoadError::Io(dir.to_path_buf(), e))?;
        files.sort();

        let mut sets = Vec::new();
        let mut seen_ids: HashSet<String> = HashSet::new();

        for path in &files {
            match load_set_file(path, &mut seen_ids) {
                Some(set) => sets.push(set),
                None => continue,
            }
        }

        let total: usize = sets.iter().map(|s| s.patterns.len()).sum();
        if total == 0 {
            return Err(PatternLoadError::NoPatternsLoaded(dir.to_path_buf()));
        }

        tracing::info!(
            "Loaded {} patterns across {} sets from {}",
            total,
            sets.len(),
            dir.display()
        );

        Ok(Self { sets })
    }

    /// Build a registry from already-compiled sets (test seam)
    pub fn from_sets(sets: Vec<PatternSet>) -> Self {
        Self { sets }
    }

    /// Stable, read-only view in load order
    pub fn sets(&self) -> &[PatternSet] {
        &self.sets
    }

    pub fn pattern_count(&self) -> usize {
        self.sets.iter().map(|s| s.patterns.len()).sum()
    }
}

// ============================================================================
// LOADING
// ============================================================================

fn collect_json_files(dir: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_json_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            out.push(path);
        }
    }
    Ok(())
}

/// Parse and compile one set file. Returns None when the file as a whole is
/// unusable; individual bad patterns are dropped without sinking the set.
fn load_set_file(path: &Path, seen_ids: &mut HashSet<String>) -> Option<PatternSet> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("Skipping pattern file {}: {}", path.display(), e);
            return None;
        }
    };

    let file: PatternSetFile = match serde_json::from_str(&raw) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!("Skipping unparseable pattern file {}: {}", path.display(), e);
            return None;
        }
    };

    let mut patterns = Vec::new();
    for def in &file.patterns {
        if seen_ids.contains(&def.id) {
            tracing::warn!(
                "Skipping pattern '{}' in {}: duplicate id",
                def.id,
                path.display()
            );
            continue;
        }

        match compile_pattern(def) {
            Ok(pattern) => {
                seen_ids.insert(def.id.clone());
                patterns.push(Arc::new(pattern));
            }
            Err(e) => {
                tracing::warn!(
                    "Skipping pattern '{}' in {}: {}",
                    def.id,
                    path.display(),
                    e
                );
            }
        }
    }

    Some(PatternSet {
        library_id: file.metadata.library_id,
        patterns,
    })
}

/// Compile one authored pattern into its loaded form. Any regex failure
/// rejects the whole pattern.
fn compile_pattern(def: &PatternDefinition) -> Result<Pattern, String> {
    let severity = match Severity::parse(&def.severity) {
        Some(severity) => severity,
        None => {
            tracing::warn!(
                "Pattern '{}' has unknown severity '{}', treating as INFO",
                def.id,
                def.severity
            );
            Severity::Info
        }
    };

    let primary = PrimaryPattern {
        regex: compile_regex(&def.primary_pattern.regex, "primary")?,
        confidence: def.primary_pattern.confidence,
    };

    let mut secondaries = Vec::with_capacity(def.secondary_patterns.len());
    for sp in &def.secondary_patterns {
        secondaries.push(SecondaryPattern {
            regex: compile_regex(&sp.regex, "secondary")?,
            weight: sp.weight,
            proximity_window: sp.proximity_window,
        });
    }

    let mut sequences = Vec::with_capacity(def.sequence_patterns.len());
    for sq in &def.sequence_patterns {
        if sq.events.is_empty() {
            return Err(format!("sequence '{}' has no events", sq.description));
        }
        let mut events = Vec::with_capacity(sq.events.len());
        for ev in &sq.events {
            events.push(compile_regex(&ev.regex, "sequence event")?);
        }
        sequences.push(SequencePattern {
            description: sq.description.clone(),
            events,
            bonus_multiplier: sq.bonus_multiplier,
        });
    }

    Ok(Pattern {
        id: def.id.clone(),
        name: def.name.clone(),
        severity,
        primary,
        secondaries,
        sequences,
        context_extraction: def.context_extraction.clone(),
    })
}

fn compile_regex(raw: &str, role: &str) -> Result<Regex, String> {
    Regex::new(raw).map_err(|e| format!("invalid {} regex '{}': {}", role, raw, e))
}

// ============================================================================
// TESTS
// ============================================================================
