//! CLI definition using clap

use clap::{Args, Parser, Subcommand};
use prikazy_domain::model::ReportState;
use prikazy_types::{IntAdr, OutputFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prikazy")]
#[command(version)]
#[command(about = "Compensation calculator for trail-marking work orders")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Tariff table file (JSON or TOML). Uses config value if not specified.
    #[arg(long, short = 't', global = true)]
    pub tariffs: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Report given either as a JSON file or as a stored order ID
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Path to report JSON file
    #[arg(required_unless_present = "order", conflicts_with = "order")]
    pub report: Option<PathBuf>,

    /// Stored order ID
    #[arg(long, short = 'o')]
    pub order: Option<String>,

    /// Replace the report's team with members from a CSV file
    #[arg(long)]
    pub team: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute compensation for a report
    Compute {
        #[command(flatten)]
        source: ReportArgs,

        /// Show only this member (INT_ADR)
        #[arg(long, short = 'm')]
        member: Option<IntAdr>,
    },

    /// Show work hours per member
    Hours {
        #[command(flatten)]
        source: ReportArgs,
    },

    /// Inspect the tariff table
    Tariff {
        #[command(subcommand)]
        action: TariffAction,
    },

    /// Manage stored reports
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Export compensation to Excel (.xlsx) or CSV (.csv)
    Export {
        #[command(flatten)]
        source: ReportArgs,

        /// Output file path
        #[arg(long = "output", short = 'O')]
        output: PathBuf,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set tariff table file
        #[arg(long)]
        set_tariffs: Option<PathBuf>,

        /// Set report store directory
        #[arg(long)]
        set_store_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reject tariff tables with overlapping or missing buckets
        #[arg(long)]
        set_strict_tariffs: Option<bool>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum TariffAction {
    /// Print the tariff table
    Show,

    /// Check the duration ladders for overlaps and gaps
    Validate,

    /// Find the meal and work allowance for a duration
    Lookup {
        /// Work duration in hours
        #[arg(long)]
        hours: f64,
    },
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Import a report JSON file into the store
    Import {
        /// Path to report JSON file
        file: PathBuf,
    },

    /// List stored reports
    List,

    /// Show a stored report
    Show {
        /// Order ID
        order: String,
    },

    /// Show completion status of a stored report
    Status {
        /// Order ID
        order: String,
    },

    /// Change the state of a stored report
    Transition {
        /// Order ID
        order: String,

        /// Target state (draft, send, submitted, approved, rejected)
        #[arg(long)]
        to: ReportState,
    },

    /// Delete a stored report
    Delete {
        /// Order ID
        order: String,
    },
}
