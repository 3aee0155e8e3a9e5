//! Configuration module

use std::env;

use crate::logic::scoring::{ContextVariant, ScoringConfig};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Directory of pattern set files
    pub pattern_directory: String,

    /// Directory of keyword weight files
    pub keywords_directory: String,

    /// Scoring knobs
    pub scoring: ScoringConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = ScoringConfig::default();

        let scoring = ScoringConfig {
            proximity_decay_constant: parse_env(
                "SCORING_PROXIMITY_DECAY_CONSTANT",
                defaults.proximity_decay_constant,
            ),
            proximity_max_window: parse_env(
                "SCORING_PROXIMITY_MAX_WINDOW",
                defaults.proximity_max_window,
            ),
            chrono_early_threshold: parse_env(
                "SCORING_CHRONO_EARLY_THRESHOLD",
                defaults.chrono_early_threshold,
            ),
            chrono_max_early_bonus: parse_env(
                "SCORING_CHRONO_MAX_EARLY_BONUS",
                defaults.chrono_max_early_bonus,
            ),
            chrono_penalty_threshold: parse_env(
                "SCORING_CHRONO_PENALTY_THRESHOLD",
                defaults.chrono_penalty_threshold,
            ),
            context_variant: context_variant_from_env(defaults.context_variant),
            max_context_factor: parse_env(
                "SCORING_CONTEXT_MAX_FACTOR",
                defaults.max_context_factor,
            ),
            frequency_threshold: parse_env(
                "SCORING_FREQUENCY_THRESHOLD",
                defaults.frequency_threshold,
            ),
            frequency_max_penalty: parse_env(
                "SCORING_FREQUENCY_MAX_PENALTY",
                defaults.frequency_max_penalty,
            ),
            frequency_window_hours: parse_env(
                "SCORING_FREQUENCY_WINDOW_HOURS",
                defaults.frequency_window_hours,
            ),
        };

        Self {
            port: parse_env("PORT", 8080),

            pattern_directory: env::var("PATTERN_DIRECTORY")
                .unwrap_or_else(|_| "patterns".to_string()),

            keywords_directory: env::var("KEYWORDS_DIRECTORY")
                .unwrap_or_else(|_| "keywords".to_string()),

            scoring,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn context_variant_from_env(default: ContextVariant) -> ContextVariant {
    match env::var("SCORING_CONTEXT_VARIANT").ok().as_deref() {
        Some("regex") => ContextVariant::RegexClasses,
        Some("keywords") => ContextVariant::Keywords,
        Some(other) => {
            tracing::warn!(
                "Unknown SCORING_CONTEXT_VARIANT '{}', keeping default",
                other
            );
            default
        }
        None => default,
    }
}
