//! HTML link extraction
//!
//! Only anchor targets (`<a href="...">`) are extracted. Images, scripts,
//! stylesheets and `<link>` elements are ignored.

use scraper::{Html, Selector};

/// Link-extraction capability consumed by the crawl engine
///
/// Implementations return raw href strings in document order and never fail:
/// a document that cannot be understood simply yields no links.
pub trait LinkExtractor: Send + Sync {
    fn extract_links(&self, body: &str) -> Vec<String>;
}

/// Default extractor backed by `scraper`'s lenient HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, body: &str) -> Vec<String> {
        extract_links(body)
    }
}

/// Extracts every anchor href from an HTML document
///
/// Values are returned unresolved, with surrounding whitespace removed. Empty
/// hrefs are skipped.
///
/// # Example
///
/// ```
/// use site_sweep::crawler::extract_links;
///
/// let html = r#"<html><body><a href="/page">Link</a><a href="https://x.com/a">A</a></body></html>"#;
/// assert_eq!(extract_links(html), vec!["/page", "https://x.com/a"]);
/// ```
pub fn extract_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}
