//! Listing URL templates and job-URL host checks for bdgovtjob.net.

use std::num::NonZeroU32;

use url::Url;

use crate::error::ScrapeError;

pub const DEFAULT_BASE_URL: &str = "https://bdgovtjob.net";

/// Listing sections the site exposes. Anything unrecognised means the homepage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Hot,
    Newest,
    Barishal,
    Home,
}

impl Section {
    pub fn from_query(section: Option<&str>) -> Self {
        match section {
            Some("hot") => Self::Hot,
            Some("newest") => Self::Newest,
            Some("barishal") => Self::Barishal,
            _ => Self::Home,
        }
    }

    /// `(path, query)` pair; paginated URLs insert `page/{n}/` between them.
    fn template(self) -> (&'static str, &'static str) {
        match self {
            Self::Hot => ("/category/hot-jobs/", ""),
            Self::Newest => ("/", "?s=&job_category=&deadline=&pub_date=30_days"),
            Self::Barishal => ("/", "?s=barishal"),
            Self::Home => ("/", ""),
        }
    }
}

/// Parses the `page` query value. Missing means the first page.
pub fn parse_page(raw: Option<&str>) -> Result<NonZeroU32, ScrapeError> {
    let Some(raw) = raw else {
        return Ok(NonZeroU32::MIN);
    };
    raw.trim()
        .parse::<NonZeroU32>()
        .map_err(|_| ScrapeError::InvalidPage(raw.to_string()))
}

/// The source site: where listings live and which hosts detail requests may hit.
#[derive(Debug, Clone)]
pub struct Site {
    base: String,
    host: String,
}

impl Site {
    pub fn new(base_url: &str) -> Result<Self, ScrapeError> {
        let invalid = |reason: &str| ScrapeError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: reason.to_string(),
        };

        let parsed = Url::parse(base_url).map_err(|err| invalid(&err.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(invalid("scheme must be http/https"));
        }
        let host = parsed
            .host_str()
            .ok_or_else(|| invalid("missing host"))?
            .to_ascii_lowercase();

        Ok(Self {
            base: base_url.trim_end_matches('/').to_string(),
            host,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn build_url(&self, section: Section, page: NonZeroU32) -> String {
        let (path, query) = section.template();
        if page.get() > 1 {
            format!("{}{path}page/{page}/{query}", self.base)
        } else {
            format!("{}{path}{query}", self.base)
        }
    }

    /// Accepts the site host itself or any subdomain of it.
    pub fn validate_job_url(&self, raw: &str) -> Result<Url, ScrapeError> {
        let url = Url::parse(raw.trim()).map_err(|_| ScrapeError::InvalidJobUrl)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ScrapeError::InvalidJobUrl);
        }
        let host = url.host_str().ok_or(ScrapeError::InvalidJobUrl)?;

        let allowed = host == self.host
            || host
                .strip_suffix(self.host.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'));
        if !allowed {
            return Err(ScrapeError::InvalidJobUrl);
        }
        Ok(url)
    }
}

impl Default for Site {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_URL.to_string(),
            host: "bdgovtjob.net".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_url_table() {
        let site = Site::default();
        let cases = [
            (Some("hot"), 1, "https://bdgovtjob.net/category/hot-jobs/"),
            (Some("hot"), 2, "https://bdgovtjob.net/category/hot-jobs/page/2/"),
            (
                Some("newest"),
                1,
                "https://bdgovtjob.net/?s=&job_category=&deadline=&pub_date=30_days",
            ),
            (
                Some("newest"),
                4,
                "https://bdgovtjob.net/page/4/?s=&job_category=&deadline=&pub_date=30_days",
            ),
            (Some("barishal"), 1, "https://bdgovtjob.net/?s=barishal"),
            (Some("barishal"), 7, "https://bdgovtjob.net/page/7/?s=barishal"),
            (None, 1, "https://bdgovtjob.net/"),
            (None, 3, "https://bdgovtjob.net/page/3/"),
            (Some("dhaka"), 1, "https://bdgovtjob.net/"),
            (Some("HOT"), 2, "https://bdgovtjob.net/page/2/"),
        ];
        for (section, n, expected) in cases {
            let url = site.build_url(Section::from_query(section), page(n));
            assert_eq!(url, expected, "section={section:?} page={n}");
        }
    }

    #[test]
    fn test_build_url_is_deterministic() {
        let site = Site::default();
        let first = site.build_url(Section::Hot, page(2));
        let second = site.build_url(Section::Hot, page(2));
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_base_drops_trailing_slash() {
        let site = Site::new("http://127.0.0.1:8080/").unwrap();
        assert_eq!(site.host(), "127.0.0.1");
        assert_eq!(
            site.build_url(Section::Barishal, page(2)),
            "http://127.0.0.1:8080/page/2/?s=barishal"
        );
    }

    #[test]
    fn test_base_url_rejects_bad_input() {
        assert!(matches!(
            Site::new("not a url"),
            Err(ScrapeError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            Site::new("ftp://bdgovtjob.net"),
            Err(ScrapeError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page(None).unwrap().get(), 1);
        assert_eq!(parse_page(Some("5")).unwrap().get(), 5);
        for bad in ["0", "-2", "abc", "", "1.5"] {
            assert!(
                matches!(parse_page(Some(bad)), Err(ScrapeError::InvalidPage(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_job_url_host_check() {
        let site = Site::default();
        assert!(site.validate_job_url("https://bdgovtjob.net/job/123").is_ok());
        assert!(site.validate_job_url("https://www.bdgovtjob.net/job/123").is_ok());
        assert!(site.validate_job_url("https://BDGOVTJOB.net/job/123").is_ok());

        for bad in [
            "https://evil.example.com/x",
            "https://evilbdgovtjob.net/x",
            "https://bdgovtjob.net.evil.com/x",
            "javascript:alert(1)",
            "/job/123",
            "",
        ] {
            assert!(
                matches!(site.validate_job_url(bad), Err(ScrapeError::InvalidJobUrl)),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_job_url_message() {
        assert_eq!(ScrapeError::InvalidJobUrl.to_string(), "Invalid job URL.");
    }
}
