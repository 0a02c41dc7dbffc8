//! Cross-engine validation of a search query.

use std::time::Duration;

use tracing::{debug, warn};
use urlfinder_core::{Engine, EngineSet, MatchResult};

use crate::{SearchBackend, SearchError};

/// Runs a query through every configured engine's backend.
///
/// Every engine is checked even after earlier misses. A backend error or a
/// check exceeding the timeout counts as a non-match for that engine only.
pub struct SearchValidator {
    engines: EngineSet,
    backends: Vec<Box<dyn SearchBackend>>,
    timeout: Duration,
}

impl SearchValidator {
    /// `backends` must serve the engines of `engines`, one each, in the same order.
    pub fn new(
        engines: EngineSet,
        backends: Vec<Box<dyn SearchBackend>>,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        let served: Vec<Engine> = backends.iter().map(|b| b.engine()).collect();
        if served != engines.engines() {
            let names: Vec<&str> = served.iter().map(Engine::as_str).collect();
            return Err(SearchError::Misconfigured(format!(
                "expected [{}], got [{}]",
                engines
                    .iter()
                    .map(|e| e.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                names.join(", ")
            )));
        }
        Ok(Self {
            engines,
            backends,
            timeout,
        })
    }

    /// Check `query` against every engine, in configured order.
    pub async fn check_all(&self, query: &str) -> MatchResult {
        let mut flags = Vec::with_capacity(self.backends.len());
        for backend in &self.backends {
            let engine = backend.engine();
            let matched = match tokio::time::timeout(self.timeout, backend.check_match(query)).await
            {
                Ok(Ok(found)) => found,
                Ok(Err(e)) => {
                    warn!(engine = %engine, error = %e, "search check failed, counting as no match");
                    false
                }
                Err(_) => {
                    let e = SearchError::Timeout(self.timeout);
                    warn!(engine = %engine, error = %e, "search check failed, counting as no match");
                    false
                }
            };
            debug!(engine = %engine, matched, "search check complete");
            flags.push(matched);
        }
        MatchResult::from_flags(&self.engines, &flags)
    }
}
