//! Field extraction for bdgovtjob.net listing and job pages.
//!
//! The site's WordPress templates are not consistent between pages, so every
//! field is read through a [`FieldPath`]: a chain of selectors where a missing
//! link yields `None` rather than an error.

use common::{JobDetail, JobSummary};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::ScrapeError;

/// What to read from the element a path ends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Read {
    /// Text nodes concatenated as-is, then runs of whitespace collapsed to
    /// one space and the ends trimmed. Adjacent inline elements with no
    /// whitespace between them stay joined.
    Text,
    Attr(&'static str),
    /// Serialized markup of the element itself, tags included.
    OuterHtml,
}

impl Read {
    fn apply(self, node: ElementRef<'_>) -> Option<String> {
        match self {
            Self::Text => {
                let text = node.text().collect::<String>();
                let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
                (!text.is_empty()).then_some(text)
            }
            Self::Attr(name) => node.value().attr(name).map(str::to_string),
            Self::OuterHtml => Some(node.html()),
        }
    }
}

/// A chain of selectors, each applied inside the first match of the previous one.
#[derive(Debug, Clone)]
pub struct FieldPath {
    steps: Vec<Selector>,
    read: Read,
}

impl FieldPath {
    pub fn new(steps: &[&str], read: Read) -> Result<Self, ScrapeError> {
        let steps = steps
            .iter()
            .map(|step| parse_selector(step))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { steps, read })
    }

    fn walk<'a>(steps: &[Selector], root: ElementRef<'a>) -> Option<ElementRef<'a>> {
        steps
            .iter()
            .try_fold(root, |node, step| node.select(step).next())
    }

    /// Value at the end of the path, or `None` if any step finds nothing.
    pub fn get(&self, root: ElementRef<'_>) -> Option<String> {
        let node = Self::walk(&self.steps, root)?;
        self.read.apply(node)
    }

    /// Values for every match of the last step, in document order.
    ///
    /// Earlier steps still take their first match only. A match with nothing
    /// to read yields an empty string so the list keeps one entry per match.
    pub fn get_all(&self, root: ElementRef<'_>) -> Vec<String> {
        let Some((last, parents)) = self.steps.split_last() else {
            return self.read.apply(root).into_iter().collect();
        };
        let Some(parent) = Self::walk(parents, root) else {
            return Vec::new();
        };
        parent
            .select(last)
            .map(|node| self.read.apply(node).unwrap_or_default())
            .collect()
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|err| ScrapeError::InvalidSelector {
        selector: selector.to_string(),
        reason: err.to_string(),
    })
}

/// Field paths for the site's post templates.
#[derive(Debug, Clone)]
pub struct Extractor {
    item: Selector,
    title: FieldPath,
    link: FieldPath,
    image: FieldPath,
    vacancies: FieldPath,
    deadline: FieldPath,
    publish_date: FieldPath,
    // Older template variant renders the date as a <time> tag instead of an info-box.
    publish_date_fallback: FieldPath,
    summary: FieldPath,
    categories: FieldPath,
    content: FieldPath,
}

impl Extractor {
    pub fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            item: parse_selector("article.post")?,
            title: FieldPath::new(&["h2.entry-title"], Read::Text)?,
            link: FieldPath::new(&["h2.entry-title", "a"], Read::Attr("href"))?,
            image: FieldPath::new(&["div.post-image", "img"], Read::Attr("src"))?,
            vacancies: FieldPath::new(
                &["div.job-info-box.job-vacancy", "div.job-value"],
                Read::Text,
            )?,
            deadline: FieldPath::new(
                &["div.job-info-box.job-deadline", "div.job-value"],
                Read::Text,
            )?,
            publish_date: FieldPath::new(
                &["div.job-info-box.job-publish-date", "div.job-value"],
                Read::Text,
            )?,
            publish_date_fallback: FieldPath::new(&["time.entry-date"], Read::Text)?,
            summary: FieldPath::new(&["div.entry-summary"], Read::Text)?,
            categories: FieldPath::new(
                &["footer.entry-meta", r#"a[rel~="category"][rel~="tag"]"#],
                Read::Text,
            )?,
            content: FieldPath::new(&["div.entry-content"], Read::OuterHtml)?,
        })
    }

    fn publish_date(&self, root: ElementRef<'_>) -> Option<String> {
        self.publish_date
            .get(root)
            .or_else(|| self.publish_date_fallback.get(root))
    }

    pub fn extract_summary(&self, item: ElementRef<'_>) -> JobSummary {
        JobSummary {
            title: self.title.get(item),
            link: self.link.get(item),
            image: self.image.get(item),
            vacancies: self.vacancies.get(item),
            deadline: self.deadline.get(item),
            publish_date: self.publish_date(item),
            summary: self.summary.get(item),
            categories: self.categories.get_all(item),
        }
    }

    /// Every post on a listing page, in page order. Incomplete posts are kept.
    pub fn scrape_listing(&self, document: &Html) -> Vec<JobSummary> {
        let jobs = document
            .select(&self.item)
            .map(|item| self.extract_summary(item))
            .collect::<Vec<_>>();
        debug!(count = jobs.len(), "extracted listing items");
        jobs
    }

    pub fn extract_detail(&self, document: &Html, url: &str) -> JobDetail {
        let root = document.root_element();
        JobDetail {
            title: self.title.get(root),
            image: self.image.get(root),
            content_html: self.content.get(root),
            publish_date: self.publish_date(root),
            categories: self.categories.get_all(root),
            url: url.to_string(),
        }
    }

    pub fn listing_from_html(&self, html: &str) -> Vec<JobSummary> {
        self.scrape_listing(&Html::parse_document(html))
    }

    pub fn detail_from_html(&self, html: &str, url: &str) -> JobDetail {
        self.extract_detail(&Html::parse_document(html), url)
    }
}
