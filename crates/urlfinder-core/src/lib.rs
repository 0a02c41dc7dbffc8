//! Core types: input records, engine configuration, per-engine match results, confidence tiers.

mod error;
pub use error::CoreError;

pub mod confidence;
pub mod engine;
pub mod record;
pub mod verdict;

pub use confidence::{Confidence, ConfidenceTier, score};
pub use engine::{Engine, EngineSet, search_url};
pub use record::Record;
pub use verdict::MatchResult;
