//! bdgovtjob.net Job Scraper
//!
//! Runs one listing or detail scrape and prints the JSON envelope,
//! or saves it with `--out`.

use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    jobscraper::logging::init().context("init logging")?;

    let cli = jobscraper::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    jobscraper::cli::run(cli).await
}
