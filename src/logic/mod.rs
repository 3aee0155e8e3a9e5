//! Logic Module - Analysis Engine
//!
//! Pipeline for one pod failure:
//! - Registry -> Scan -> Context -> Scoring -> Result
//!
//! ### Patterns (`pattern/`)
//! - `types.rs` - on-disk shapes + `Severity`
//! - `registry.rs` - validated, regex-precompiled sets
//!
//! ### Analysis (`analysis/`)
//! - `types.rs` - payload + result model
//! - `context.rs` - surrounding-lines extraction
//! - `engine.rs` - line x pattern scan and result assembly
//!
//! ### Scoring (`scoring/`)
//! - `rules.rs` - constants + `ScoringConfig`
//! - `pipeline.rs` - factor composition
//! - one file per factor (chronological, proximity, sequence, context,
//!   frequency), plus the keyword store

pub mod analysis;
pub mod pattern;
pub mod scoring;
