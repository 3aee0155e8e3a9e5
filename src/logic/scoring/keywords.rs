//! Keyword Weight Store
//!
//! Weighted keywords for the keyword-variant context scorer. Loaded once at
//! startup from a directory of JSON files, each a nested
//! `{category: {keyword: weight}}` map; categories are flattened into one
//! lookup table. Immutable after load.

use std::collections::BTreeMap;
use std::path::Path;

// ============================================================================
// STORE
// ============================================================================

/// Flattened keyword -> weight table
#[derive(Debug, Default)]
pub struct KeywordWeights {
    weights: BTreeMap<String, f64>,
}

impl KeywordWeights {
    /// Load every `*.json` file in `dir` (sorted order). Files that fail to
    /// parse are skipped with a warning; a missing directory yields an empty
    /// store. Conflicting weights across files keep the first-loaded value.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut store = Self::default();

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "Keywords directory {} not readable ({}), context factor will be neutral",
                    dir.display(),
                    e
                );
                return store;
            }
        };

        let mut files: Vec<_> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")))
            .collect();
        files.sort();

        for path in &files {
            let loaded = store.merge_file(path);
            tracing::info!("Loaded {} keywords from {}", loaded, path.display());
        }

        tracing::info!(
            "Keyword store ready: {} keywords from {} files",
            store.len(),
            files.len()
        );

        store
    }

    /// Test seam: build a store from literal pairs
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self {
            weights: pairs.iter().map(|(k, w)| (k.to_string(), *w)).collect(),
        }
    }

    fn merge_file(&mut self, path: &Path) -> usize {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Skipping keyword file {}: {}", path.display(), e);
                return 0;
            }
        };

        let categories: BTreeMap<String, BTreeMap<String, f64>> =
            match serde_json::from_str(&raw) {
                Ok(categories) => categories,
                Err(e) => {
                    tracing::warn!("Skipping unparseable keyword file {}: {}", path.display(), e);
                    return 0;
                }
            };

        let mut loaded = 0;
        for (category, keywords) in categories {
            for (keyword, weight) in keywords {
                match self.weights.get(&keyword) {
                    Some(existing) if *existing != weight => {
                        tracing::warn!(
                            "Keyword '{}' redefined with weight {} (keeping {})",
                            keyword,
                            weight,
                            existing
                        );
                    }
                    Some(_) => {}
                    None => {
                        self.weights.insert(keyword, weight);
                        loaded += 1;
                    }
                }
            }
            tracing::debug!("Merged keyword category '{}'", category);
        }

        loaded
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, w)| (k.as_str(), *w))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_flattens_categories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("core.json"),
            r#"{
                "memory": {"OutOfMemoryError": 0.9, "heap space": 0.7},
                "disk": {"No space left": 0.8}
            }"#,
        )
        .unwrap();

        let store = KeywordWeights::load(dir.path());
        assert_eq!(store.len(), 3);
        assert!(store.iter().any(|(k, w)| k == "heap space" && w == 0.7));
    }

    #[test]
    fn test_conflicts_keep_first_loaded_value() {
        let dir = tempfile::tempdir().unwrap();
        // Sorted order: a.json merges before b.json
        fs::write(dir.path().join("a.json"), r#"{"c": {"timeout": 0.5}}"#).unwrap();
        fs::write(dir.path().join("b.json"), r#"{"c": {"timeout": 0.9}}"#).unwrap();

        let store = KeywordWeights::load(dir.path());
        assert_eq!(store.len(), 1);
        assert!(store.iter().any(|(k, w)| k == "timeout" && w == 0.5));
    }

    #[test]
    fn test_bad_file_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), "not json").unwrap();
        fs::write(dir.path().join("ok.json"), r#"{"c": {"panic": 1.0}}"#).unwrap();

        let store = KeywordWeights::load(dir.path());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_directory_yields_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeywordWeights::load(dir.path().join("does-not-exist"));
        assert!(store.is_empty());
    }
}
