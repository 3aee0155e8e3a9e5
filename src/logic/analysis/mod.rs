//! Analysis Module
//!
//! One invocation = one captured log scanned against the registry.
//!
//! ## Structure
//! - `types`: request payload + result model
//! - `context`: surrounding-lines extraction per pattern rules
//! - `engine`: the orchestrator

pub mod context;
pub mod engine;
pub mod types;


pub use engine::AnalysisEngine;
pub use types::{AnalysisResult, EventContext, MatchedEvent, PodFailureData};
