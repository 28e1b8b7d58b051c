//! Job Scraper Server
//!
//! Exposes the bdgovtjob.net listing and detail scrapes as a JSON API using Axum.

use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use jobscraper::cli::SiteArgs;

mod app;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct AppArgs {
    #[arg(long, env = "JOBSCRAPER_ADDR", default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Browser origin allowed by CORS (repeatable or comma separated).
    #[arg(
        long = "allowed-origin",
        env = "JOBSCRAPER_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = app::DEFAULT_ALLOWED_ORIGIN
    )]
    allowed_origins: Vec<String>,

    #[command(flatten)]
    site: SiteArgs,
}

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

    let args = AppArgs::parse();
    tracing::debug!(?args, "parsed args");

    let scraper = Arc::new(args.site.build_scraper()?);
    let cors = app::cors_layer(&args.allowed_origins)?;
    tracing::info!(
        base = scraper.site().base(),
        origins = ?args.allowed_origins,
        "scraping upstream site"
    );

    let router = app::router(scraper, cors);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;
    tracing::info!(addr = %args.addr, "server running");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("serve")?;

    Ok(())
}
