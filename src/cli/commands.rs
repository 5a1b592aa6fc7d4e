//! CLI commands and argument parsing

use crate::types::InvestmentType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for the PeerBerry investor API
#[derive(Parser, Debug)]
#[command(name = "deerberry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML); falls back to DEERBERRY_* variables
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Credential file, overrides the config
    #[arg(long, global = true)]
    pub credentials: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List loans on the primary market, newest first
    Loans {
        /// Maximum number of loans
        #[arg(long)]
        limit: Option<u64>,

        /// Items requested per page
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Show one loan
    Loan {
        /// Loan id
        id: String,

        /// Print the response as returned instead of the decoded model
        #[arg(long)]
        raw: bool,
    },

    /// List your investments
    Investments {
        /// Which investments to list
        #[arg(long = "type", value_enum, default_value = "current")]
        kind: InvestmentType,

        /// Maximum number of investments
        #[arg(long)]
        limit: Option<u64>,

        /// Items requested per page
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Delete the stored credential so the next command logs in again
    Logout,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}
