use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::fetch::{DEFAULT_USER_AGENT, HttpFetcher};
use crate::jobs::JobScraper;
use crate::site::{DEFAULT_BASE_URL, Site};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub site: SiteArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Upstream settings shared by the CLI and the server.
#[derive(Debug, Clone, Args)]
pub struct SiteArgs {
    /// Origin of the job site.
    #[arg(long, global = true, env = "JOBSCRAPER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// User-Agent sent upstream.
    #[arg(long, global = true, env = "JOBSCRAPER_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl SiteArgs {
    pub fn build_scraper(&self) -> anyhow::Result<JobScraper<HttpFetcher>> {
        let site = Site::new(&self.base_url).context("parse --base-url")?;
        let fetcher = HttpFetcher::new(&self.user_agent).context("build http client")?;
        JobScraper::new(site, fetcher).context("build extractor")
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape one listing page.
    List(ListArgs),
    /// Scrape a single job page.
    Detail(DetailArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// hot, newest, barishal; anything else means the homepage.
    #[arg(long)]
    pub section: Option<String>,

    #[arg(long)]
    pub page: Option<String>,

    /// Write JSON here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct DetailArgs {
    #[arg(long)]
    pub url: String,

    /// Write JSON here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let scraper = cli.site.build_scraper()?;

    let error = match cli.command {
        Command::List(args) => {
            let result = scraper
                .list_jobs(args.section.as_deref(), args.page.as_deref())
                .await;
            emit(&result, args.out.as_deref())?;
            result.error
        }
        Command::Detail(args) => {
            let result = scraper.job_details(&args.url).await;
            emit(&result, args.out.as_deref())?;
            result.error().map(str::to_owned)
        }
    };

    if let Some(error) = error {
        anyhow::bail!("scrape failed: {error}");
    }
    Ok(())
}

fn emit<T: Serialize>(value: &T, out: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize result")?;

    let Some(path) = out else {
        println!("{json}");
        return Ok(());
    };

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir: {}", dir.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "saved result");
    Ok(())
}
