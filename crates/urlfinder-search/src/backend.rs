//! Per-engine search capability.

use async_trait::async_trait;
use urlfinder_core::Engine;

use crate::SearchError;

/// Checks whether one search engine finds the target of a query.
///
/// One implementation per engine (or one configurable implementation
/// instantiated per engine). The validator owns a backend for each engine
/// in the configured set.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    fn engine(&self) -> Engine;

    async fn check_match(&self, query: &str) -> Result<bool, SearchError>;
}
