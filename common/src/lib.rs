//! JSON shapes shared by the scraper library, its CLI and the HTTP server.
//!
//! Every optional field serializes as `null` when absent; keys are never
//! dropped, so clients can rely on their presence.

use serde::{Deserialize, Serialize};

/// One posting as it appears on a listing page.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct JobSummary {
    pub title: Option<String>,
    pub link: Option<String>,
    pub image: Option<String>,
    /// Raw site text, e.g. "১২০ জন" or "Various".
    pub vacancies: Option<String>,
    /// Raw site-formatted date string.
    pub deadline: Option<String>,
    pub publish_date: Option<String>,
    pub summary: Option<String>,
    pub categories: Vec<String>,
}

/// A single job page.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct JobDetail {
    pub title: Option<String>,
    pub image: Option<String>,
    /// Outer markup of the content region, kept verbatim for rendering.
    pub content_html: Option<String>,
    pub publish_date: Option<String>,
    pub categories: Vec<String>,
    pub url: String,
}

/// Envelope returned by the listing operation.
///
/// `error` is only present on failure; `url` and `section` are always echoed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScrapeResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub url: String,
    pub section: Option<String>,
    pub jobs: Vec<JobSummary>,
}

impl ScrapeResult {
    pub fn success(url: String, section: Option<String>, jobs: Vec<JobSummary>) -> Self {
        Self {
            error: None,
            url,
            section,
            jobs,
        }
    }

    pub fn failure(error: impl ToString, url: String, section: Option<String>) -> Self {
        Self {
            error: Some(error.to_string()),
            url,
            section,
            jobs: Vec::new(),
        }
    }
}

/// Envelope returned by the detail operation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum DetailResult {
    // Listed first so that deserializing an error body never matches `JobDetail`.
    Failed { error: String, url: String },
    Found(JobDetail),
}

impl DetailResult {
    pub fn failure(error: impl ToString, url: impl Into<String>) -> Self {
        Self::Failed {
            error: error.to_string(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Failed { url, .. } => url,
            Self::Found(detail) => &detail.url,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error, .. } => Some(error),
            Self::Found(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_absent_summary_fields_serialize_as_null() {
        let value = serde_json::to_value(JobSummary::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "title": null,
                "link": null,
                "image": null,
                "vacancies": null,
                "deadline": null,
                "publish_date": null,
                "summary": null,
                "categories": [],
            })
        );
    }

    #[test]
    fn test_success_envelope_has_no_error_key() {
        let result = ScrapeResult::success("https://bdgovtjob.net/".into(), None, vec![]);
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("error").is_none());
        assert_eq!(value["section"], Value::Null);
        assert_eq!(value["jobs"], json!([]));
    }

    #[test]
    fn test_failure_envelope_keeps_context() {
        let result = ScrapeResult::failure(
            "connection refused",
            "https://bdgovtjob.net/category/hot-jobs/".into(),
            Some("hot".into()),
        );
        assert_eq!(result.error.as_deref(), Some("connection refused"));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["error"], "connection refused");
        assert_eq!(value["url"], "https://bdgovtjob.net/category/hot-jobs/");
        assert_eq!(value["section"], "hot");
        assert_eq!(value["jobs"], json!([]));
    }

    #[test]
    fn test_detail_failure_shape() {
        let result = DetailResult::failure("Invalid job URL.", "https://evil.example.com/x");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({ "error": "Invalid job URL.", "url": "https://evil.example.com/x" })
        );
    }

    #[test]
    fn test_detail_found_is_flat() {
        let result = DetailResult::Found(JobDetail {
            title: Some("Officer".into()),
            url: "https://bdgovtjob.net/job/1".into(),
            ..Default::default()
        });
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["title"], "Officer");
        assert_eq!(value["content_html"], Value::Null);
        assert_eq!(value["url"], "https://bdgovtjob.net/job/1");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_detail_result_deserializes_both_shapes() {
        let failed: DetailResult =
            serde_json::from_str(r#"{"error":"boom","url":"https://bdgovtjob.net/x"}"#).unwrap();
        assert_eq!(failed.error(), Some("boom"));

        let found: DetailResult = serde_json::from_str(
            r#"{"title":null,"image":null,"content_html":null,"publish_date":null,"categories":[],"url":"https://bdgovtjob.net/x"}"#,
        )
        .unwrap();
        assert_eq!(found.error(), None);
        assert_eq!(found.url(), "https://bdgovtjob.net/x");
    }
}
