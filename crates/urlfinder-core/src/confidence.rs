//! Agreement-based confidence scoring.
//!
//! Converts a [`MatchResult`] into a discrete [`ConfidenceTier`]:
//!
//! - every engine matched → `High`
//! - all but one engine matched → `Medium`
//! - anything less → `Low`
//!
//! With the default three engines that is 3 → High, 2 → Medium, 0 or 1 → Low.
//! A single-engine set never reaches `Medium`: zero matches is `Low`.

use std::fmt;

use crate::{Engine, MatchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scored outcome for one query. Immutable once built by [`score`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confidence {
    pub tier: ConfidenceTier,
    pub match_count: usize,
    pub total: usize,
    pub breakdown: Vec<(Engine, bool)>,
}

impl Confidence {
    /// `(2/3 matches) google: MATCH | bing: FAIL | duckduckgo: MATCH`
    pub fn summary(&self) -> String {
        let engines: Vec<String> = self
            .breakdown
            .iter()
            .map(|(engine, matched)| {
                format!("{}: {}", engine, if *matched { "MATCH" } else { "FAIL" })
            })
            .collect();
        format!(
            "({}/{} matches) {}",
            self.match_count,
            self.total,
            engines.join(" | ")
        )
    }
}

/// Score a match result. Pure: same input, same output.
pub fn score(result: &MatchResult) -> Confidence {
    let total = result.len();
    let match_count = result.match_count();

    let tier = if total > 0 && match_count == total {
        ConfidenceTier::High
    } else if match_count > 0 && match_count + 1 == total {
        ConfidenceTier::Medium
    } else {
        ConfidenceTier::Low
    };

    Confidence {
        tier,
        match_count,
        total,
        breakdown: result.entries().to_vec(),
    }
}
