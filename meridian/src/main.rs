#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod capture;
mod commands;

use args::Args;
use clap::Parser;
use meridian_config::Config;
use meridian_registry::ModelCapabilityResolver;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Without a file every section takes its defaults
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    meridian_telemetry::init(args.config.as_ref().map(|_| &config.telemetry), &args.log_filter)?;

    if let Some(path) = &args.config {
        tracing::info!(config_path = %path.display(), "configuration loaded");
    }

    let resolver = ModelCapabilityResolver::from_config(&config.models)?;
    let output = commands::run(args.command, &resolver).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
