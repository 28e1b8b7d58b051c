//! bdgovtjob.net scraper
//!
//! Builds listing URLs for the site, fetches pages and turns the WordPress
//! markup into [`common::JobSummary`] and [`common::JobDetail`] records.

#![forbid(unsafe_code)]

pub mod cli;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod jobs;
pub mod logging;
pub mod site;

pub use error::ScrapeError;
pub use extract::{Extractor, FieldPath, Read};
pub use fetch::{DEFAULT_USER_AGENT, Fetch, HttpFetcher};
pub use jobs::JobScraper;
pub use site::{DEFAULT_BASE_URL, Section, Site};
