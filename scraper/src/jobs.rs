//! The two scrape operations. Both always return a well-formed envelope.

use std::num::NonZeroU32;

use common::{DetailResult, ScrapeResult};
use tracing::{info, warn};

use crate::error::ScrapeError;
use crate::extract::Extractor;
use crate::fetch::Fetch;
use crate::site::{Section, Site, parse_page};

pub struct JobScraper<F> {
    site: Site,
    fetcher: F,
    extractor: Extractor,
}

impl<F: Fetch> JobScraper<F> {
    pub fn new(site: Site, fetcher: F) -> Result<Self, ScrapeError> {
        Ok(Self {
            site,
            fetcher,
            extractor: Extractor::new()?,
        })
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Scrapes one listing page. `section` is echoed back exactly as given.
    pub async fn list_jobs(&self, section: Option<&str>, page: Option<&str>) -> ScrapeResult {
        let echo = section.map(str::to_owned);
        let kind = Section::from_query(section);

        let page = match parse_page(page) {
            Ok(page) => page,
            Err(err) => {
                let url = self.site.build_url(kind, NonZeroU32::MIN);
                warn!(%url, error = %err, "rejected listing request");
                return ScrapeResult::failure(err, url, echo);
            }
        };

        let url = self.site.build_url(kind, page);
        info!(%url, ?section, "scraping listing");

        match self.fetcher.fetch(&url).await {
            Ok(body) => {
                let jobs = self.extractor.listing_from_html(&body);
                info!(%url, count = jobs.len(), "scraped listing");
                ScrapeResult::success(url, echo, jobs)
            }
            Err(err) => {
                warn!(%url, error = %err, "listing fetch failed");
                ScrapeResult::failure(err, url, echo)
            }
        }
    }

    /// Scrapes one job page. URLs outside the site are refused before any fetch.
    pub async fn job_details(&self, url: &str) -> DetailResult {
        let target = match self.site.validate_job_url(url) {
            Ok(target) => target,
            Err(err) => {
                warn!(%url, "refusing job url outside {}", self.site.host());
                return DetailResult::failure(err, url);
            }
        };

        info!(%target, "scraping job details");
        match self.fetcher.fetch(target.as_str()).await {
            Ok(body) => DetailResult::Found(self.extractor.detail_from_html(&body, url)),
            Err(err) => {
                warn!(%url, error = %err, "job details fetch failed");
                DetailResult::failure(err, url)
            }
        }
    }
}
