//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Gapscope: equality score reports from a country/year table
#[derive(Parser)]
#[command(name = "gapscope")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (JSON)
    #[arg(short, long, global = true, value_name = "CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show scores, trends, recommendations and actions for one country and year
    Report {
        /// Path to the scores file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Country code (ISO3)
        #[arg(value_name = "COUNTRY")]
        entity: String,

        /// Year to report (default: latest finalized year for the country)
        #[arg(short, long)]
        year: Option<i32>,

        /// Country metadata file (JSON) for display names
        #[arg(short, long)]
        meta: Option<PathBuf>,

        /// Seed for content selection (default: random)
        #[arg(long)]
        seed: Option<u64>,

        /// Number of draws to print (each one a reroll)
        #[arg(long, default_value = "1")]
        draws: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List finalized years available for a country
    Years {
        /// Path to the scores file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Country code (ISO3)
        #[arg(value_name = "COUNTRY")]
        entity: String,

        /// Sort order
        #[arg(short, long, default_value = "desc")]
        order: OrderChoice,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize a load: dropped rows, imputed cells, coverage
    Summary {
        /// Path to the scores file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Country metadata file (JSON) for per-region coverage
        #[arg(short, long)]
        meta: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List content bank entries
    Bank {
        /// Which bank to list
        #[arg(value_name = "BANK", default_value = "all")]
        which: BankChoice,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OrderChoice {
    Asc,
    #[default]
    Desc,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum BankChoice {
    #[default]
    All,
    Recommendations,
    Actions,
}
