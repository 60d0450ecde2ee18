//! Per-request outcome policy
//!
//! Every request result, success or failure, is mapped here to what the crawl
//! engine does with the URL next.

use crate::crawler::fetcher::HttpResult;
use reqwest::StatusCode;

const HTML_MEDIA_TYPE: &str = "text/html";

/// What a HEAD request says about a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// 200 with an HTML media type
    Html,

    /// 200 with any other or no media type; the URL is never fetched
    NotHtml { content_type: Option<String> },

    /// The HEAD did not give a usable answer; the URL is fetched anyway
    FailOpen { reason: String },
}

impl Classification {
    pub fn is_fetchable(&self) -> bool {
        !matches!(self, Self::NotHtml { .. })
    }
}

/// What a GET request yields for link extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 200: the document body
    Page(String),

    /// Anything else: the URL is dropped without retry
    Dropped { reason: String },
}

/// Classifies a HEAD result
///
/// | Result | Classification |
/// |--------|----------------|
/// | 200, media type `text/html` (any case, parameters ignored) | Html |
/// | 200, other or missing media type | NotHtml |
/// | non-200 status | FailOpen |
/// | timeout / transport error | FailOpen |
pub fn classify_response(result: &HttpResult) -> Classification {
    match result {
        Ok(response) if response.status == StatusCode::OK => {
            let content_type = response.content_type();
            if content_type.is_some_and(is_html_media_type) {
                Classification::Html
            } else {
                Classification::NotHtml {
                    content_type: content_type.map(str::to_string),
                }
            }
        }
        Ok(response) => Classification::FailOpen {
            reason: format!("HTTP {}", response.status.as_u16()),
        },
        Err(e) => Classification::FailOpen {
            reason: e.to_string(),
        },
    }
}

/// Maps a GET result to a page body or a drop
pub fn fetch_outcome(result: HttpResult) -> FetchOutcome {
    match result {
        Ok(response) if response.status == StatusCode::OK => FetchOutcome::Page(response.body),
        Ok(response) => FetchOutcome::Dropped {
            reason: format!("HTTP {}", response.status.as_u16()),
        },
        Err(e) => FetchOutcome::Dropped {
            reason: e.to_string(),
        },
    }
}

/// Returns true if the media type of a Content-Type value is `text/html`
///
/// # Examples
///
/// ```
/// use site_sweep::crawler::is_html_media_type;
///
/// assert!(is_html_media_type("text/html; charset=utf-8"));
/// assert!(is_html_media_type("TEXT/HTML"));
/// assert!(!is_html_media_type("image/svg+xml"));
/// ```
pub fn is_html_media_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .eq_ignore_ascii_case(HTML_MEDIA_TYPE)
}
