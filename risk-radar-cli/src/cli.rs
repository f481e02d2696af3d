use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Score a contract along five risk dimensions.
#[derive(Parser, Debug)]
#[command(name = "risk-radar", version, about, long_about = None)]
pub struct Cli {
    /// Scoring configuration (TOML); defaults apply when omitted or missing
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess a contract text file
    Assess {
        /// Extracted contract text
        contract: PathBuf,

        /// Clause analysis from the language model (raw reply or JSON)
        #[arg(short, long)]
        analysis: Option<PathBuf>,

        /// Fail on an unreadable analysis instead of using the fallback
        #[arg(long)]
        strict: bool,

        /// Seed for the noise floor, for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the keyword index
    Keywords {
        /// Restrict to one category
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
