//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use spendscope_core::patterns::{SortKey, TypeFilter, DEFAULT_CURRENCY};
use spendscope_core::Timeframe;

/// Spendscope - Find the patterns in your spending
#[derive(Parser)]
#[command(name = "spendscope")]
#[command(about = "Spending pattern analysis for categorized transactions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Currency symbol used in generated text
    #[arg(long, global = true, env = "SPENDSCOPE_CURRENCY", default_value = DEFAULT_CURRENCY)]
    pub currency: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect spending patterns in a transaction file
    Analyze {
        /// Transaction file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Window label: week, month, quarter, year
        #[arg(short, long, default_value = "month")]
        timeframe: Timeframe,

        /// Pattern type to keep: all, trend, recurring, anomaly, behavioral
        #[arg(long = "type", default_value = "all")]
        pattern_type: TypeFilter,

        /// Sort order: impact, confidence, id
        #[arg(short, long, default_value = "impact")]
        sort: SortKey,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Count patterns by impact, type, confidence, and trend direction
    Summary {
        /// Transaction file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Window label: week, month, quarter, year
        #[arg(short, long, default_value = "month")]
        timeframe: Timeframe,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show one pattern with its chart series
    Detail {
        /// Transaction file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Pattern id (e.g., "trend:food_&_dining")
        #[arg(long)]
        id: String,

        /// Window label: week, month, quarter, year
        #[arg(short, long, default_value = "month")]
        timeframe: Timeframe,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}
