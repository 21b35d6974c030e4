//! Spendscope CLI - Spending pattern analysis
//!
//! Usage:
//!   spendscope analyze --file tx.csv           Detect and rank patterns
//!   spendscope summary --file tx.csv           Count patterns by impact/type
//!   spendscope detail --file tx.csv --id ID    Show one pattern with chart data
//!   spendscope serve --port 3000               Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use spendscope_core::PatternQuery;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
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

    match cli.command {
        Commands::Analyze {
            file,
            timeframe,
            pattern_type,
            sort,
            json,
        } => {
            let query = PatternQuery::new(pattern_type, sort);
            commands::cmd_analyze(&file, timeframe, &query, &cli.currency, json)
        }
        Commands::Summary {
            file,
            timeframe,
            json,
        } => commands::cmd_summary(&file, timeframe, &cli.currency, json),
        Commands::Detail {
            file,
            id,
            timeframe,
            json,
        } => commands::cmd_detail(&file, timeframe, &id, &cli.currency, json),
        Commands::Serve { port, host } => commands::cmd_serve(&host, port, &cli.currency).await,
    }
}
