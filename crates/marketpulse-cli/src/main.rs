mod cli;
mod error;
mod output;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use marketpulse_core::{sentiment, AppConfig, SnapshotAggregator};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(deadline_ms) = cli.deadline_ms {
        let deadline = (deadline_ms > 0).then(|| Duration::from_millis(deadline_ms));
        config = config.with_total_deadline(deadline);
    }

    match &cli.command {
        Command::Snapshot { symbol } => {
            let aggregator = SnapshotAggregator::new(&config);
            let snapshot = aggregator.aggregate(symbol).await?;
            output::render_snapshot(&snapshot, cli.pretty)?;

            // Exit 3 signals "served, but degraded" for scripted callers.
            if snapshot.is_fully_live() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(3))
            }
        }
        Command::Sources => {
            output::render_sources(&config);
            Ok(ExitCode::SUCCESS)
        }
        Command::Score { text } => {
            output::render_score(text, sentiment::score(text));
            Ok(ExitCode::SUCCESS)
        }
    }
}
