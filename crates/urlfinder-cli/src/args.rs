//! Command-line configuration. Every flag has an environment fallback.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Fixed substring rules; no network.
    Simulated,
    /// Serper-style JSON search API.
    Http,
}

#[derive(Debug, Parser)]
#[command(
    name = "urlfinder",
    version,
    about = "Generate search queries from tabular records with a local LLM and score them by cross-engine agreement"
)]
pub struct Args {
    /// CSV file with a header row; one prompt per data row.
    #[arg(long, env = "URLFINDER_DATA", default_value = "businesses.txt")]
    pub data: PathBuf,

    /// Prompt template file name, looked up in --template-dir.
    #[arg(long, env = "URLFINDER_TEMPLATE", default_value = "instructions.txt")]
    pub template: String,

    #[arg(long, env = "URLFINDER_TEMPLATE_DIR", default_value = "templates")]
    pub template_dir: PathBuf,

    /// Ollama model name.
    #[arg(long, env = "URLFINDER_MODEL", default_value = "llama3")]
    pub model: String,

    #[arg(long, env = "OLLAMA_HOST", default_value = "http://localhost:11434")]
    pub ollama_url: String,

    /// Seconds before a model call is abandoned.
    #[arg(long, env = "URLFINDER_MODEL_TIMEOUT", default_value_t = 120)]
    pub model_timeout: u64,

    /// Comma-separated engines to cross-check, in report order.
    #[arg(long, env = "URLFINDER_ENGINES", default_value = "google,bing,duckduckgo")]
    pub engines: String,

    #[arg(long, value_enum, env = "URLFINDER_BACKEND", default_value_t = BackendKind::Simulated)]
    pub backend: BackendKind,

    /// Search API endpoint for the http backend.
    #[arg(long, env = "URLFINDER_SEARCH_URL", default_value = "https://google.serper.dev/search")]
    pub search_url: String,

    /// Search API key; required by the http backend.
    #[arg(long, env = "URLFINDER_SEARCH_API_KEY", hide_env_values = true)]
    pub search_api_key: Option<String>,

    /// A result linking to this domain counts as a match.
    #[arg(long, env = "URLFINDER_MATCH_DOMAIN", default_value = "g2.com")]
    pub match_domain: String,

    /// Seconds before a single engine check counts as no match.
    #[arg(long, env = "URLFINDER_ENGINE_TIMEOUT", default_value_t = 30)]
    pub engine_timeout: u64,
}

impl Args {
    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout)
    }

    pub fn engine_timeout(&self) -> Duration {
        Duration::from_secs(self.engine_timeout)
    }
}
