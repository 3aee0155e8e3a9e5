//! Pattern Module
//!
//! Failure signatures and the registry that loads them.
//!
//! ## Structure
//! - `types`: raw on-disk shapes + `Severity`
//! - `registry`: validated, regex-precompiled model and the directory loader

pub mod registry;
pub mod types;

pub use registry::{
    Pattern, PatternLoadError, PatternRegistry, PatternSet, PrimaryPattern, SecondaryPattern,
    SequencePattern,
};
pub use types::{ContextExtractionRules, Severity};
