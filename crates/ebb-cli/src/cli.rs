//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Ebb - Private mood journal analytics
#[derive(Parser)]
#[command(name = "ebb")]
#[command(about = "On-device analytics for a private mood journal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine config override (defaults to the user data dir, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Derive tone and keywords from a piece of text
    Signals {
        /// Text to analyze
        #[arg(short, long)]
        text: String,

        /// Signal backend: lexicon, heuristic, mock (overrides config and EBB_SIGNAL_BACKEND)
        #[arg(short, long)]
        backend: Option<String>,
    },

    /// Show the well-being score breakdown for entries
    Score {
        /// JSON file with an array of entries
        #[arg(short, long)]
        entries: PathBuf,

        /// Only score the entry with this id
        #[arg(long)]
        id: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show mood and score trends
    Trends {
        /// JSON file with an array of entries
        #[arg(short, long)]
        entries: PathBuf,

        /// Time period: last-7-days, last-30-days, this-month, this-year, all
        #[arg(short, long, default_value = "all")]
        period: String,

        /// Days in the rolling score average
        #[arg(long, default_value = "7")]
        rolling_days: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show progress toward journaling goals
    Goals {
        /// JSON file with an array of entries
        #[arg(short, long)]
        entries: PathBuf,

        /// JSON file with an array of goals
        #[arg(short, long)]
        goals: PathBuf,

        /// Include inactive goals
        #[arg(long)]
        all: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved engine configuration
    Config,
}
