//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sievelists")]
#[command(author, version, about = "Domain-only block lists from public filter lists")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// YAML config file (built-in sources are used when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output directory (overrides the config file)
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download every source and regenerate its domain list
    Update {
        /// Only process these source identifiers (repeatable)
        #[arg(long = "only", value_name = "ID")]
        only: Vec<String>,
    },

    /// List configured sources
    Sources,

    /// Check that generated lists are sorted and well-formed
    Verify,

    /// Show version
    Version,
}
