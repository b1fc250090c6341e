use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Price landscaping jobs, print customer quotes, and keep a local record of
/// saved estimates, customers and rates.
#[derive(Debug, Parser)]
#[command(name = "landscape-estimator", version, about)]
pub struct Cli {
    /// Settings file. Missing files fall back to built-in defaults.
    #[arg(long, default_value = "estimator.toml", global = true)]
    pub config: PathBuf,

    /// Storage backend, overriding the settings file.
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Database location, overriding the settings file.
    /// For SQLite this is a file path (e.g. `estimates.db`) or `:memory:`.
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Log filter, e.g. `debug` or `quote_core=trace`. Defaults to RUST_LOG,
    /// then `info`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Price a draft estimate and print the quote
    Quote {
        /// Draft estimate JSON file
        draft: PathBuf,
        #[arg(long, value_enum, default_value_t = QuoteFormat::Text)]
        format: QuoteFormat,
    },
    /// Print an email subject, body and mailto: link for a draft
    Email {
        /// Draft estimate JSON file
        draft: PathBuf,
    },
    /// Price a draft and save it, numbering it if needed
    Save {
        /// Draft estimate JSON file
        draft: PathBuf,
    },
    /// List saved estimates, newest first
    List,
    /// Print a saved estimate with the totals frozen when it was saved
    Show {
        id: i64,
        #[arg(long, value_enum, default_value_t = SavedFormat::Text)]
        format: SavedFormat,
    },
    /// Delete a saved estimate
    Delete { id: i64 },
    /// Print a copy of a saved estimate as a new draft (JSON)
    Duplicate { id: i64 },
    /// Look up a customer in the directory
    Customer { name: String },
    /// List known customer names
    Customers,
    /// Inspect or change the rate table
    Rates {
        #[command(subcommand)]
        command: RatesCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum RatesCommand {
    /// Print every rate
    Show,
    /// Change one rate, e.g. `rates set labor_per_hour 60`
    Set { name: String, value: String },
    /// Restore the default price book
    Reset,
    /// Merge a `name,value` CSV price list into the stored rates
    Import { file: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuoteFormat {
    /// Plain-text customer quote
    Text,
    /// Line items as CSV
    Csv,
    /// Line items and totals as JSON
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SavedFormat {
    /// Plain-text customer quote
    Text,
    /// The saved record as JSON
    Json,
}
