//! Reporter trait and the bundled reporters
//!
//! The crawl's only observable output is the stream of canonical URLs it
//! discovers. Reporters receive each URL when it is admitted to the frontier
//! and again when its page is processed.

use crate::url::CanonicalUrl;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// Receives discovery events from the crawl engine
pub trait CrawlReporter: Send + Sync {
    /// A new in-scope URL entered the frontier
    fn url_admitted(&mut self, url: &CanonicalUrl);

    /// A fetched page is about to have its links extracted
    fn page_started(&mut self, url: &CanonicalUrl);
}

/// Writes discovered URLs to stdout, one per line
///
/// Admitted URLs are prefixed with `--> `; processed pages are printed bare.
#[derive(Debug, Default)]
pub struct StdoutReporter;

impl CrawlReporter for StdoutReporter {
    fn url_admitted(&mut self, url: &CanonicalUrl) {
        // A closed stdout (e.g. piped into `head`) must not stop the crawl
        let _ = writeln!(std::io::stdout().lock(), "--> {}", url);
    }

    fn page_started(&mut self, url: &CanonicalUrl) {
        let _ = writeln!(std::io::stdout().lock(), "{}", url);
    }
}

/// A single discovery event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Admitted(CanonicalUrl),
    PageStarted(CanonicalUrl),
}

/// Records events in memory
///
/// Clones share one event log, so a clone kept by the caller observes what the
/// engine reported.
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    events: Arc<Mutex<Vec<ReportEvent>>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReportEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// URLs admitted, in admission order
    pub fn admitted(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ReportEvent::Admitted(url) => Some(url.into_string()),
                ReportEvent::PageStarted(_) => None,
            })
            .collect()
    }

    /// Pages processed, in processing order
    pub fn pages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ReportEvent::PageStarted(url) => Some(url.into_string()),
                ReportEvent::Admitted(_) => None,
            })
            .collect()
    }

    fn push(&self, event: ReportEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl CrawlReporter for CollectingReporter {
    fn url_admitted(&mut self, url: &CanonicalUrl) {
        self.push(ReportEvent::Admitted(url.clone()));
    }

    fn page_started(&mut self, url: &CanonicalUrl) {
        self.push(ReportEvent::PageStarted(url.clone()));
    }
}
