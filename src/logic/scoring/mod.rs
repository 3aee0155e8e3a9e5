//! Scoring Module
//!
//! Multi-factor scoring for matched events. Each factor lives in its own
//! file and is computable on its own; `pipeline` multiplies them together.
//!
//! ## Structure
//! - `rules`: constants + `ScoringConfig`
//! - `pipeline`: factor composition
//! - `chronological`: position-in-log factor
//! - `proximity`: exponential-decay bonus from nearby secondary patterns
//! - `sequence`: ordered event-chain bonus (temporal factor)
//! - `context`: surrounding-lines factor (regex classes or keyword weights)
//! - `keywords`: keyword-weight store for the keyword variant
//! - `frequency`: sliding-window repeat-match penalty

pub mod chronological;
pub mod context;
pub mod frequency;
pub mod keywords;
pub mod pipeline;
pub mod proximity;
pub mod rules;
pub mod sequence;

pub use context::ContextVariant;
pub use frequency::FrequencyTracker;
pub use keywords::KeywordWeights;
pub use pipeline::calculate_score;
pub use rules::{severity_multiplier, ScoringConfig};
