//! Stand-in backend with fixed substring rules, used until a search API key is configured.
//!
//! The rules are deterministic placeholders chosen to exercise every confidence
//! tier. They are not a model of how any engine ranks results.

use async_trait::async_trait;
use urlfinder_core::{Engine, EngineSet};

use crate::{SearchBackend, SearchError};

type MatchRule = fn(&str) -> bool;

pub struct SimulatedBackend {
    engine: Engine,
    rule: MatchRule,
}

impl SimulatedBackend {
    /// Stand-in for `engine`, using its built-in rule.
    pub fn new(engine: Engine) -> Self {
        let rule: MatchRule = match engine {
            Engine::Google => |q: &str| q.contains("diebold") || q.contains("paccar"),
            Engine::Bing => |q: &str| q.contains("paccar") && q.contains("g2"),
            Engine::DuckDuckGo => |q: &str| q == "diebold g2 reviews",
        };
        Self::with_rule(engine, rule)
    }

    /// Stand-in with a custom rule. The rule sees the lower-cased query.
    pub fn with_rule(engine: Engine, rule: MatchRule) -> Self {
        Self { engine, rule }
    }

    /// One stand-in per engine of `set`, in order.
    pub fn for_set(set: &EngineSet) -> Vec<Box<dyn SearchBackend>> {
        set.iter()
            .map(|engine| Box::new(Self::new(engine)) as Box<dyn SearchBackend>)
            .collect()
    }
}

#[async_trait]
impl SearchBackend for SimulatedBackend {
    fn engine(&self) -> Engine {
        self.engine
    }

    async fn check_match(&self, query: &str) -> Result<bool, SearchError> {
        Ok((self.rule)(&query.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn check(engine: Engine, query: &str) -> bool {
        SimulatedBackend::new(engine).check_match(query).await.unwrap()
    }

    #[tokio::test]
    async fn google_matches_either_brand() {
        assert!(check(Engine::Google, "Diebold G2 Reviews").await);
        assert!(check(Engine::Google, "paccar reviews").await);
        assert!(!check(Engine::Google, "acme g2 reviews").await);
    }

    #[tokio::test]
    async fn bing_needs_paccar_and_g2() {
        assert!(check(Engine::Bing, "PACCAR G2 Reviews").await);
        assert!(!check(Engine::Bing, "paccar reviews").await);
        assert!(!check(Engine::Bing, "diebold g2 reviews").await);
    }

    #[tokio::test]
    async fn duckduckgo_needs_exact_query() {
        assert!(check(Engine::DuckDuckGo, "Diebold G2 Reviews").await);
        assert!(!check(Engine::DuckDuckGo, "diebold g2 reviews 2025").await);
    }

    #[tokio::test]
    async fn for_set_follows_set_order() {
        let set = EngineSet::new(vec![Engine::DuckDuckGo, Engine::Bing]).unwrap();
        let engines: Vec<Engine> = SimulatedBackend::for_set(&set)
            .iter()
            .map(|b| b.engine())
            .collect();
        assert_eq!(engines, [Engine::DuckDuckGo, Engine::Bing]);
    }
}
