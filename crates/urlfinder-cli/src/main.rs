mod args;
mod input;
mod pipeline;
mod report;

use anyhow::{Context, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use urlfinder_ai::{OllamaClient, QueryExtractor};
use urlfinder_core::EngineSet;
use urlfinder_search::{
    HttpBackend, HttpSearchConfig, SearchBackend, SearchValidator, SimulatedBackend,
};

use crate::args::{Args, BackendKind};
use crate::input::{PromptTemplate, load_records};
use crate::pipeline::Pipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("urlfinder v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    // Configuration errors stop the run before any record is processed.
    let engines = EngineSet::parse_list(&args.engines).context("invalid --engines")?;
    let backends = build_backends(&args, &engines)?;
    let validator = SearchValidator::new(engines, backends, args.engine_timeout())
        .context("building search validator")?;

    println!(
        "Loading data from '{}' and template '{}'...",
        args.data.display(),
        args.template
    );
    let records = load_records(&args.data).context("loading data")?;
    let template =
        PromptTemplate::load(&args.template_dir, &args.template).context("loading template")?;

    tracing::info!(
        template = template.name(),
        records = records.len(),
        model = %args.model,
        "starting batch"
    );

    let model = OllamaClient::new(&args.ollama_url, args.model.clone(), args.model_timeout())
        .context("building model client")?;
    let pipeline = Pipeline::new(Box::new(model), QueryExtractor::default(), validator);

    let summary = pipeline
        .run(&template, &records, |index, outcome| {
            print!("{}", report::render_outcome(index, outcome));
        })
        .await;
    println!("{}", report::render_summary(&summary));

    Ok(())
}

fn build_backends(
    args: &Args,
    engines: &EngineSet,
) -> anyhow::Result<Vec<Box<dyn SearchBackend>>> {
    match args.backend {
        BackendKind::Simulated => Ok(SimulatedBackend::for_set(engines)),
        BackendKind::Http => {
            let Some(api_key) = args.search_api_key.clone() else {
                bail!("--backend http requires --search-api-key (or URLFINDER_SEARCH_API_KEY)");
            };
            let config = HttpSearchConfig {
                endpoint: args.search_url.clone(),
                api_key,
                match_domain: args.match_domain.clone(),
                timeout: args.engine_timeout(),
            };
            HttpBackend::for_set(engines, &config).context("building search backends")
        }
    }
}
