use std::error::Error as StdError;

use thiserror::Error;

/// Failures the scraper reports back inside a result envelope.
///
/// Missing markup is never an error here; it shows up as `None` fields.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("page must be a positive integer, got {0:?}")]
    InvalidPage(String),

    #[error("Invalid job URL.")]
    InvalidJobUrl,

    #[error("invalid base url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid selector {selector}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("upstream returned {status} for {url}")]
    Upstream { status: u16, url: String },

    // reqwest's own message leaves out the cause (refused, DNS, TLS).
    #[error("{}", with_causes(.0))]
    Transport(#[from] reqwest::Error),
}

/// `outer: cause: root cause`, skipping causes already quoted by their parent.
fn with_causes(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
