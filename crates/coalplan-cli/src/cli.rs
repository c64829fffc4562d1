use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fuel procurement planning for a coal-fired plant", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve the procurement model and report the plan and sensitivities
    Solve {
        /// TOML configuration file; omit for the base case
        #[arg(long)]
        config: Option<PathBuf>,
        /// Keep only binding rows in the sensitivity tables
        #[arg(long)]
        summary: bool,
        /// Directory to write the CSV tables into
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the full result as JSON instead of tables
        #[arg(long)]
        json: bool,
        /// Append a run record to this JSONL history file
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// List recorded runs from a history file
    History {
        /// JSONL history file written by `solve --history`
        file: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}
