//! Per-engine match flags for one query.

use crate::{Engine, EngineSet};

/// Exactly one flag per configured engine, in configured order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    entries: Vec<(Engine, bool)>,
}

impl MatchResult {
    /// Pair each engine of `set` with the flag at the same position.
    ///
    /// Missing flags count as non-matches; extra flags are ignored.
    pub fn from_flags(set: &EngineSet, flags: &[bool]) -> Self {
        let entries = set
            .iter()
            .enumerate()
            .map(|(i, engine)| (engine, flags.get(i).copied().unwrap_or(false)))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[(Engine, bool)] {
        &self.entries
    }

    pub fn get(&self, engine: Engine) -> Option<bool> {
        self.entries
            .iter()
            .find(|(e, _)| *e == engine)
            .map(|(_, matched)| *matched)
    }

    pub fn match_count(&self) -> usize {
        self.entries.iter().filter(|(_, matched)| *matched).count()
    }

    /// Number of engines checked (N).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_flags_follows_set_order() {
        let set = EngineSet::default();
        let result = MatchResult::from_flags(&set, &[true, false, true]);
        assert_eq!(result.match_count(), 2);
        assert_eq!(result.get(Engine::Bing), Some(false));
        assert_eq!(result.entries()[2], (Engine::DuckDuckGo, true));
    }

    #[test]
    fn missing_flags_are_non_matches() {
        let set = EngineSet::default();
        let result = MatchResult::from_flags(&set, &[true]);
        assert_eq!(result.len(), 3);
        assert_eq!(result.match_count(), 1);
    }
}
