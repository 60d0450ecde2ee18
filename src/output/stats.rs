//! Crawl statistics
//!
//! Counters accumulated by the crawl engine over one run.

use std::fmt::Write;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Number of completed rounds
    pub rounds: u64,

    /// URLs admitted to the frontier, seed included
    pub urls_admitted: u64,

    /// Pages fetched with HTTP 200 and handed to link extraction
    pub pages_fetched: u64,

    /// URLs whose HEAD reported a non-HTML media type
    pub skipped_non_html: u64,

    /// URLs fetched despite a failed or non-200 HEAD
    pub classify_fail_open: u64,

    /// URLs dropped by a failed or non-200 GET
    pub fetch_failures: u64,

    /// Hrefs examined across all fetched pages
    pub links_examined: u64,
}

/// Formats statistics for display
pub fn format_statistics(stats: &CrawlStats) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Crawl Statistics ===");
    let _ = writeln!(out, "Rounds:                {}", stats.rounds);
    let _ = writeln!(out, "URLs discovered:       {}", stats.urls_admitted);
    let _ = writeln!(out, "Pages fetched:         {}", stats.pages_fetched);
    let _ = writeln!(out, "Links examined:        {}", stats.links_examined);
    let _ = writeln!(out, "Skipped (not HTML):    {}", stats.skipped_non_html);
    let _ = writeln!(out, "HEAD failed (fetched): {}", stats.classify_fail_open);
    let _ = write!(out, "Fetch failures:        {}", stats.fetch_failures);

    out
}

/// Prints statistics to stderr, keeping stdout for discovered URLs
pub fn print_statistics(stats: &CrawlStats) {
    eprintln!("{}", format_statistics(stats));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_statistics() {
        let stats = CrawlStats {
            rounds: 3,
            urls_admitted: 12,
            pages_fetched: 9,
            skipped_non_html: 2,
            classify_fail_open: 1,
            fetch_failures: 1,
            links_examined: 40,
        };

        let text = format_statistics(&stats);

        assert!(text.starts_with("=== Crawl Statistics ==="));
        assert!(text.contains("Rounds:                3"));
        assert!(text.contains("URLs discovered:       12"));
        assert!(text.contains("Skipped (not HTML):    2"));
        assert!(text.ends_with("Fetch failures:        1"));
    }
}
