use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing::debug;

use quote_cli::app::{self, Estimator};
use quote_cli::cli::Cli;
use quote_cli::config::EstimatorConfig;
use quote_cli::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_default_logging();
    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let config = EstimatorConfig::load(&cli.config)?.with_overrides(cli.backend, cli.db);

    debug!(
        backend = %config.database.backend,
        location = %config.database.connection_string,
        "opening estimate store"
    );
    let repo = app::build_registry()
        .create(&config.database)
        .await
        .with_context(|| {
            format!(
                "Failed to open {} store '{}'",
                config.database.backend, config.database.connection_string
            )
        })?;

    let estimator = Estimator::new(repo, config.company);
    let output = estimator.run(cli.command, Utc::now()).await?;
    println!("{}", output.trim_end());

    Ok(())
}
