//! risk-radar CLI: score an extracted contract text and print the radar.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Assess {
            contract,
            analysis,
            strict,
            seed,
            format,
        } => commands::assess(&config, &contract, analysis.as_deref(), strict, seed, format)?,
        Commands::Keywords { category } => commands::keywords(&config, category.as_deref())?,
    };
    print!("{}", output);
    Ok(())
}
