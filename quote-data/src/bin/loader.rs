use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use quote_core::{EstimateRepository, RateTable};
use quote_data::RateTableLoader;
use quote_db_sqlite::SqliteRepository;

/// Load a price list from a CSV file into the estimator's rate table.
///
/// The CSV file has a `name,value` header followed by one row per rate, e.g.
/// `labor_per_hour,58.00`. Rates not listed keep their stored values.
#[derive(Parser, Debug)]
#[command(name = "rate-table-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing the price list
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database file (created if missing)
    #[arg(short, long, default_value = "estimates.db")]
    database: String,

    /// Start from the default price book instead of the stored rates
    #[arg(short, long, default_value_t = false)]
    reset: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let repo = SqliteRepository::new(&args.database)
        .await
        .with_context(|| format!("Failed to open database: {}", args.database))?;
    repo.run_migrations()
        .await
        .context("Failed to run migrations")?;

    if args.reset {
        println!("Resetting rate table to defaults...");
        repo.reset_rate_table()
            .await
            .context("Failed to reset rate table")?;
    }

    println!("Loading rates from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = RateTableLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} rates from CSV", records.len());

    let rates = RateTableLoader::load(&repo, &records)
        .await
        .context("Failed to load rates into database")?;

    let defaults = RateTable::default();
    for (name, value) in rates.entries() {
        let marker = if defaults.get(name) == Some(value) { "" } else { "  *" };
        println!("{name:<32} {value}{marker}");
    }

    Ok(())
}
