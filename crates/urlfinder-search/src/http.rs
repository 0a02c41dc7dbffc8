//! HTTP search backend for a Serper-style JSON search API.
//!
//! Posts the query with an `X-API-KEY` header and reports a match when any
//! organic result links to the configured domain (e.g. `g2.com`).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;
use urlfinder_core::{Engine, EngineSet};

use crate::{SearchBackend, SearchError};

const RESULT_COUNT: usize = 10;

#[derive(Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    num: usize,
    engine: &'static str,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Deserialize)]
struct OrganicResult {
    #[serde(default)]
    link: String,
}

/// Connection settings shared by every engine's HTTP backend.
#[derive(Debug, Clone)]
pub struct HttpSearchConfig {
    pub endpoint: String,
    pub api_key: String,
    pub match_domain: String,
    pub timeout: Duration,
}

pub struct HttpBackend {
    engine: Engine,
    client: reqwest::Client,
    config: HttpSearchConfig,
}

impl HttpBackend {
    pub fn new(engine: Engine, config: HttpSearchConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            engine,
            client,
            config,
        })
    }

    /// One HTTP backend per engine of `set`, in order.
    pub fn for_set(
        set: &EngineSet,
        config: &HttpSearchConfig,
    ) -> Result<Vec<Box<dyn SearchBackend>>, SearchError> {
        set.iter()
            .map(|engine| {
                Self::new(engine, config.clone()).map(|b| Box::new(b) as Box<dyn SearchBackend>)
            })
            .collect()
    }
}

#[async_trait]
impl SearchBackend for HttpBackend {
    fn engine(&self) -> Engine {
        self.engine
    }

    async fn check_match(&self, query: &str) -> Result<bool, SearchError> {
        info!(engine = %self.engine, query, "search request");
        let resp = self
            .client
            .post(&self.config.endpoint)
            .header("X-API-KEY", &self.config.api_key)
            .json(&SearchRequest {
                q: query,
                num: RESULT_COUNT,
                engine: self.engine.as_str(),
            })
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SearchError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let data: SearchResponse = resp.json().await?;
        let domain = self.config.match_domain.to_ascii_lowercase();
        let found = data
            .organic
            .iter()
            .any(|r| r.link.to_ascii_lowercase().contains(&domain));
        info!(
            engine = %self.engine,
            results = data.organic.len(),
            found,
            "search complete"
        );
        Ok(found)
    }
}
