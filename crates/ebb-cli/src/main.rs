//! Ebb CLI - Private mood journal analytics
//!
//! Usage:
//!   ebb signals --text "..."                Derive tone and keywords
//!   ebb score --entries entries.json        Score breakdown per entry
//!   ebb trends --entries entries.json       Mood and score trends
//!   ebb goals --entries e.json --goals g.json   Goal progress
//!   ebb config                              Show resolved configuration

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Signals { text, backend } => {
            commands::cmd_signals(&config, &text, backend.as_deref())
        }
        Commands::Score { entries, id, json } => {
            commands::cmd_score(&config, &entries, id.as_deref(), json)
        }
        Commands::Trends {
            entries,
            period,
            rolling_days,
            json,
        } => commands::cmd_trends(&config, &entries, &period, rolling_days, json),
        Commands::Goals {
            entries,
            goals,
            all,
            json,
        } => commands::cmd_goals(&config, &entries, &goals, all, json),
        Commands::Config => commands::cmd_config(&config, cli.config.as_deref()),
    }
}
