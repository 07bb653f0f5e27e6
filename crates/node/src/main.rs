//! Sensor Node - Main Entry Point

use clap::Parser;
use node::{build_reporter, build_sampling_loop, init_logging, OutputFormat, RelationshipArg};
use sampler::EngineConfig;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "sensor-node")]
#[command(version)]
#[command(about = "Samples light and temperature and reports rolling window statistics", long_about = None)]
struct Cli {
    /// Configuration file (TOML, JSON, YAML)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Override the configured relationship analysis
    #[arg(long, value_enum)]
    relationship: Option<RelationshipArg>,

    /// Report output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json)?;

    info!("=== Sensor Node v{} ===", env!("CARGO_PKG_VERSION"));

    let mut config = EngineConfig::load(cli.config.as_deref())?;
    if let Some(relationship) = cli.relationship {
        config.relationship = relationship.into();
        config.validate()?;
    }

    let mut sampling = build_sampling_loop(&config, build_reporter(cli.format))?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Ctrl-C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    sampling.run(shutdown, cli.ticks).await?;
    Ok(())
}
