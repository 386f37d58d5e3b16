mod brief;
mod config;
mod document;
mod errors;
mod generation;
mod llm_client;
mod pipeline;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::document::StyleRegistry;
use crate::llm_client::LlmClient;
use crate::pipeline::{Pipeline, ProposalJob};
use crate::render::FontSource;

/// Generates a sales proposal PDF from a plain-text customer brief.
///
/// Requires `ANTHROPIC_API_KEY`. Fonts are looked up in `PROPOSAL_FONTS_DIR`,
/// then `assets/fonts`, then the system Liberation font directories.
#[derive(Parser)]
#[command(author, version, about = "Generate a proposal PDF from a customer brief")]
struct Cli {
    /// Brief to read. Overrides BRIEF_PATH.
    #[arg(long)]
    brief: Option<PathBuf>,

    /// Directory the PDF is written to. Overrides OUTPUT_DIR.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on missing API key before any work)
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting proposer v{}", env!("CARGO_PKG_VERSION"));

    let mut llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_timeout)?;
    if let Some(base_url) = &config.anthropic_base_url {
        llm = llm.with_base_url(base_url);
    }
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm_client::MODEL,
        config.llm_timeout.as_secs()
    );

    let job = ProposalJob {
        brief_path: cli.brief.unwrap_or_else(|| config.brief_path.clone()),
        output_dir: cli.output_dir.unwrap_or_else(|| config.output_dir.clone()),
        date: chrono::Local::now().date_naive(),
    };
    let fonts = FontSource::new(config.fonts_dir.clone(), config.font_family.clone());

    let mut pipeline = Pipeline::new(&llm, StyleRegistry::proposal(), fonts);
    let output = pipeline.run(&job).await?;

    info!("Pipeline finished: {:?}", pipeline.state());
    println!("{}", output.display());
    Ok(())
}
