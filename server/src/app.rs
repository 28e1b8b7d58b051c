//! Routes for the scrape API. Handlers only unpack query strings and hand off
//! to [`JobScraper`]; every outcome is a 200 with a JSON envelope.

use std::sync::Arc;

use anyhow::Context as _;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::HeaderValue,
    routing::get,
};
use common::{DetailResult, ScrapeResult};
use jobscraper::{Fetch, JobScraper};
use serde::Deserialize;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://job-website-1.onrender.com";

/// Query parameters for the listing endpoint
#[derive(Debug, Deserialize)]
struct ScrapeParams {
    section: Option<String>,
    // Kept as text so a bad value becomes an error envelope instead of a 400.
    page: Option<String>,
}

/// Query parameters for the detail endpoint
#[derive(Debug, Deserialize)]
struct DetailParams {
    #[serde(default)]
    url: String,
}

/// Only the configured front-ends may call the API from a browser.
pub fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin.trim())
                .with_context(|| format!("invalid allowed origin: {origin}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

pub fn router<F: Fetch + 'static>(scraper: Arc<JobScraper<F>>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/healthz", get(|| async { "ok\n" }))
        .route("/scrape", get(scrape_handler::<F>))
        .route("/job_details", get(job_details_handler::<F>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(scraper)
}

/// Handler for GET /scrape?section=<section>&page=<n>
async fn scrape_handler<F: Fetch + 'static>(
    State(scraper): State<Arc<JobScraper<F>>>,
    Query(params): Query<ScrapeParams>,
) -> Json<ScrapeResult> {
    let result = scraper
        .list_jobs(params.section.as_deref(), params.page.as_deref())
        .await;
    Json(result)
}

/// Handler for GET /job_details?url=<job url>
async fn job_details_handler<F: Fetch + 'static>(
    State(scraper): State<Arc<JobScraper<F>>>,
    Query(params): Query<DetailParams>,
) -> Json<DetailResult> {
    Json(scraper.job_details(&params.url).await)
}

/// Handler for GET / (root)
async fn root_handler() -> &'static str {
    "bdgovtjob.net scraper API\n\nEndpoints:\n  GET /scrape?section=<hot|newest|barishal>&page=<n> - List jobs\n  GET /job_details?url=<job url> - Job details\n\nExample:\n  curl 'http://127.0.0.1:3000/scrape?section=hot&page=2'"
}
