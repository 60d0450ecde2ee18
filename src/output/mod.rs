//! Output module for reporting crawl results
//!
//! This module handles:
//! - Streaming discovered URLs as the crawl progresses
//! - Recording crawl statistics

pub mod stats;
mod traits;

pub use stats::{format_statistics, print_statistics, CrawlStats};
pub use traits::{CollectingReporter, CrawlReporter, ReportEvent, StdoutReporter};
