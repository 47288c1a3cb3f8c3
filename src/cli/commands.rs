use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sambad-sync")]
#[command(about = "Fetches lottery result sheets, extracts prize tiers and keeps a recent-dates index")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch, extract and store every slot for one date
    Run {
        /// Logical date (DD-MM-YY); defaults to today minus the configured offset
        #[arg(short, long)]
        date: Option<String>,

        /// Only run this time slot label (e.g. 1pm)
        #[arg(short, long)]
        slot: Option<String>,
    },

    /// Run on the configured schedule until interrupted
    Auto,

    /// Extract prizes from a local PDF or text file without storing them
    Extract {
        /// File to read
        file: String,

        /// Output format: table or json
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show stored results for a date
    Show {
        /// Logical date (DD-MM-YY)
        date: String,

        /// Output format: table or json
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show the recent-dates ledger
    Dates {
        /// Output format: table or json
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show statistics for stored results
    Stats {
        /// Output format: table or json
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Initialize database and print configuration
    Init,
}
