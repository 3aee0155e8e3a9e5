//! Frequency Tracker
//!
//! Process-wide sliding window of match timestamps per pattern id. Patterns
//! that fire constantly are usually noise rather than root causes, so
//! match rates above the configured hourly threshold earn a score penalty.
//!
//! Shared across analysis invocations on concurrent workers: the map sits
//! behind a single RwLock with entry-based insertion, and per-entry state
//! is only touched while that lock is held. Reads never mutate - expired
//! timestamps are pruned on the write path.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;

use super::rules::ScoringConfig;

const SECONDS_PER_HOUR: i64 = 3600;

// ============================================================================
// PER-PATTERN WINDOW
// ============================================================================

/// Ordered epoch-second timestamps of recent matches for one pattern
#[derive(Debug, Default)]
struct PatternFrequency {
    timestamps: Vec<i64>,
}

impl PatternFrequency {
    fn record(&mut self, now: i64, window_secs: i64) {
        self.timestamps.push(now);
        self.prune(now, window_secs);
    }

    fn prune(&mut self, now: i64, window_secs: i64) {
        let cutoff = now - window_secs;
        self.timestamps.retain(|ts| *ts >= cutoff);
    }

    fn count_in_window(&self, now: i64, window_secs: i64) -> usize {
        let cutoff = now - window_secs;
        self.timestamps.iter().filter(|ts| **ts >= cutoff).count()
    }
}

// ============================================================================
// TRACKER
// ============================================================================

#[derive(Debug)]
pub struct FrequencyTracker {
    entries: RwLock<HashMap<String, PatternFrequency>>,
    threshold: f64,
    max_penalty: f64,
    window_hours: u64,
}

impl FrequencyTracker {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            threshold: config.frequency_threshold,
            max_penalty: config.frequency_max_penalty,
            window_hours: config.frequency_window_hours.max(1),
        }
    }

    /// Record a match for `pattern_id` at the current wall-clock time
    pub fn record(&self, pattern_id: &str) {
        self.record_at(pattern_id, Utc::now().timestamp());
    }

    /// Penalty in `[0, max_penalty]` for `pattern_id` at the current
    /// wall-clock time. 0 until the hourly rate exceeds the threshold.
    pub fn penalty(&self, pattern_id: &str) -> f64 {
        self.penalty_at(pattern_id, Utc::now().timestamp())
    }

    /// Clock-injected variant of `record` - all timestamps flow through here
    pub fn record_at(&self, pattern_id: &str, now: i64) {
        if pattern_id.trim().is_empty() {
            return;
        }

        let mut entries = self.entries.write();
        let entry = entries.entry(pattern_id.to_string()).or_default();
        entry.record(now, self.window_secs());

        tracing::debug!(
            "Recorded match for pattern '{}', {} in window",
            pattern_id,
            entry.timestamps.len()
        );
    }

    /// Clock-injected variant of `penalty`
    pub fn penalty_at(&self, pattern_id: &str, now: i64) -> f64 {
        if pattern_id.trim().is_empty() {
            return 0.0;
        }

        let entries = self.entries.read();
        let entry = match entries.get(pattern_id) {
            Some(entry) => entry,
            None => return 0.0,
        };

        let count = entry.count_in_window(now, self.window_secs());
        let rate = count as f64 / self.window_hours as f64;

        if rate <= self.threshold {
            return 0.0;
        }

        let penalty = ((rate - self.threshold) / self.threshold).min(self.max_penalty);

        tracing::debug!(
            "Pattern '{}' rate {:.1}/h exceeds threshold {:.1}/h, penalty {:.3}",
            pattern_id,
            rate,
            self.threshold,
            penalty
        );

        penalty
    }

    /// Matches currently inside the window for `pattern_id`
    pub fn count(&self, pattern_id: &str) -> usize {
        let now = Utc::now().timestamp();
        self.entries
            .read()
            .get(pattern_id)
            .map_or(0, |e| e.count_in_window(now, self.window_secs()))
    }

    pub fn reset(&self, pattern_id: &str) {
        if self.entries.write().remove(pattern_id).is_some() {
            tracing::info!("Reset frequency tracking for pattern '{}'", pattern_id);
        }
    }

    pub fn reset_all(&self) {
        self.entries.write().clear();
        tracing::info!("Reset frequency tracking for all patterns");
    }

    fn window_secs(&self) -> i64 {
        self.window_hours as i64 * SECONDS_PER_HOUR
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> FrequencyTracker {
        FrequencyTracker::new(&ScoringConfig::default())
    }

    #[test]
    fn test_no_matches_no_penalty() {
        assert_eq!(tracker().penalty_at("p1", 1_000_000), 0.0);
    }

    #[test]
    fn test_below_threshold_no_penalty() {
        let t = tracker();
        let base = 1_000_000;
        for i in 0..10 {
            t.record_at("p1", base + i);
        }
        // rate = 10/h, threshold is 10/h inclusive
        assert_eq!(t.penalty_at("p1", base + 10), 0.0);
    }

    #[test]
    fn test_penalty_scales_with_excess_rate() {
        let t = tracker();
        let base = 1_000_000;
        for i in 0..15 {
            t.record_at("p1", base + i);
        }
        // rate = 15/h => (15 - 10) / 10 = 0.5
        assert!((t.penalty_at("p1", base + 15) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_penalty_is_bounded() {
        let t = tracker();
        let base = 1_000_000;
        for i in 0..500 {
            t.record_at("p1", base + i);
        }
        assert_eq!(t.penalty_at("p1", base + 500), 0.8);
    }

    #[test]
    fn test_window_expires_old_matches() {
        let t = tracker();
        let base = 1_000_000;
        for i in 0..15 {
            t.record_at("p1", base + i);
        }
        assert!(t.penalty_at("p1", base + 15) > 0.0);

        // Two hours later everything has aged out
        assert_eq!(t.penalty_at("p1", base + 2 * 3600), 0.0);
    }

    #[test]
    fn test_empty_pattern_id_is_noop() {
        let t = tracker();
        t.record_at("", 1_000_000);
        t.record_at("   ", 1_000_000);
        assert_eq!(t.penalty_at("", 1_000_000), 0.0);
    }

    #[test]
    fn test_reset_clears_one_pattern() {
        let t = tracker();
        let base = 1_000_000;
        for i in 0..20 {
            t.record_at("p1", base + i);
            t.record_at("p2", base + i);
        }
        t.reset("p1");
        assert_eq!(t.penalty_at("p1", base + 20), 0.0);
        assert!(t.penalty_at("p2", base + 20) > 0.0);

        t.reset_all();
        assert_eq!(t.penalty_at("p2", base + 20), 0.0);
    }

    #[test]
    fn test_record_prunes_expired_entries() {
        let t = tracker();
        let base = 1_000_000;
        for i in 0..5 {
            t.record_at("p1", base + i);
        }
        t.record_at("p1", base + 3 * 3600);
        assert_eq!(t.count("p1"), 0); // wall clock is far past the test base
        assert_eq!(
            t.entries.read().get("p1").unwrap().timestamps.len(),
            1
        );
    }
}
