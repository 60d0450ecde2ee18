//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator owns all state of one crawl run and drives it in rounds:
//! - Take every pending URL from the frontier as the round's batch
//! - Classify the batch with gated HEAD requests (barrier)
//! - Fetch the fetchable URLs with gated GET requests (barrier)
//! - Extract links from each page and admit the in-scope ones
//!
//! The run ends when a round leaves the frontier empty.

use crate::config::Config;
use crate::crawler::fetcher::{HttpClient, HttpResult, ReqwestClient, RequestProfile};
use crate::crawler::frontier::Frontier;
use crate::crawler::gate::ConcurrencyGate;
use crate::crawler::parser::{HtmlLinkExtractor, LinkExtractor};
use crate::crawler::policy::{classify_response, fetch_outcome, Classification, FetchOutcome};
use crate::output::{CrawlReporter, CrawlStats, StdoutReporter};
use crate::url::{canonicalize, in_scope, is_followable_relative, resolve_relative, CanonicalUrl};
use crate::CrawlError;
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Result of offering a candidate URL to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Admission {
    /// New in-scope URL, now pending
    Admitted,
    /// In scope but already seen; terminal, no fallback
    Duplicate,
    /// Invalid or out of scope
    Rejected,
}

/// Which HTTP method a gated request uses
#[derive(Debug, Clone, Copy)]
enum Method {
    Head,
    Get,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    client: Arc<dyn HttpClient>,
    extractor: Box<dyn LinkExtractor>,
    reporter: Box<dyn CrawlReporter>,
    gate: ConcurrencyGate,
    profile: Arc<RequestProfile>,
    frontier: Frontier,
    seed: CanonicalUrl,
    base_domain: String,
    stats: CrawlStats,
}

impl Coordinator {
    /// Creates a coordinator with the production transport, extractor and
    /// stdout reporter
    ///
    /// # Arguments
    ///
    /// * `seed` - The starting URL; its host becomes the crawl's base domain
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawlError)` - Invalid seed or configuration, or client setup failed
    pub fn new(seed: &str, config: &Config) -> Result<Self, CrawlError> {
        let client = ReqwestClient::new(config.crawler.concurrency_limit)?;
        Self::with_client(seed, config, Arc::new(client))
    }

    /// Creates a coordinator using the given transport
    pub fn with_client(
        seed: &str,
        config: &Config,
        client: Arc<dyn HttpClient>,
    ) -> Result<Self, CrawlError> {
        crate::config::validate(config)?;

        let seed_url =
            canonicalize(seed).ok_or_else(|| CrawlError::InvalidSeed(seed.to_string()))?;
        let base_domain = seed_url
            .host()
            .ok_or_else(|| CrawlError::InvalidSeed(seed.to_string()))?;

        let profile = RequestProfile::from_config(config)?;

        Ok(Self {
            client,
            extractor: Box::new(HtmlLinkExtractor),
            reporter: Box::new(StdoutReporter),
            gate: ConcurrencyGate::new(config.crawler.concurrency_limit),
            profile: Arc::new(profile),
            frontier: Frontier::new(),
            seed: seed_url,
            base_domain,
            stats: CrawlStats::default(),
        })
    }

    /// Replaces the link extractor
    pub fn with_extractor(mut self, extractor: Box<dyn LinkExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Replaces the reporter
    pub fn with_reporter(mut self, reporter: Box<dyn CrawlReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn seed(&self) -> &CanonicalUrl {
        &self.seed
    }

    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Runs the crawl until the frontier is empty
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlStats)` - Counters for the completed run
    /// * `Err(CrawlError)` - The concurrency gate was closed
    pub async fn run(&mut self) -> Result<CrawlStats, CrawlError> {
        tracing::info!(
            "Starting crawl at {} (domain: {}, concurrency: {})",
            self.seed,
            self.base_domain,
            self.gate.capacity()
        );
        let start_time = std::time::Instant::now();

        let seed = self.seed.clone();
        self.admit(Some(seed));

        while !self.frontier.is_empty() {
            let batch = self.frontier.take_round();
            self.stats.rounds += 1;
            tracing::info!(
                "Round {}: {} URLs to process, {} seen so far",
                self.stats.rounds,
                batch.len(),
                self.frontier.seen_count()
            );

            let fetchable = self.classify_batch(batch).await?;
            let pages = self.fetch_batch(fetchable).await?;

            for (url, body) in pages {
                self.process_page(&url, &body);
            }
        }

        tracing::info!(
            "Crawl completed: {} URLs discovered, {} pages fetched in {} rounds ({:?})",
            self.stats.urls_admitted,
            self.stats.pages_fetched,
            self.stats.rounds,
            start_time.elapsed()
        );

        Ok(self.stats.clone())
    }

    /// Issues a HEAD for every URL of the batch and keeps the fetchable ones
    async fn classify_batch(
        &mut self,
        batch: HashSet<CanonicalUrl>,
    ) -> Result<Vec<CanonicalUrl>, CrawlError> {
        let results = self.dispatch(batch, Method::Head).await?;
        let mut fetchable = Vec::with_capacity(results.len());

        for (url, joined) in results {
            let classification = match joined {
                Ok(result) => classify_response(&result),
                Err(reason) => {
                    tracing::warn!("Classification task for {} failed: {}", url, reason);
                    Classification::FailOpen { reason }
                }
            };

            match classification {
                Classification::Html => fetchable.push(url),
                Classification::FailOpen { reason } => {
                    tracing::debug!("HEAD {} inconclusive ({}), fetching anyway", url, reason);
                    self.stats.classify_fail_open += 1;
                    fetchable.push(url);
                }
                Classification::NotHtml { content_type } => {
                    tracing::debug!(
                        "Skipping {}: content type {}",
                        url,
                        content_type.as_deref().unwrap_or("<none>")
                    );
                    self.stats.skipped_non_html += 1;
                }
            }
        }

        Ok(fetchable)
    }

    /// Issues a GET for every fetchable URL and keeps the page bodies
    async fn fetch_batch(
        &mut self,
        urls: Vec<CanonicalUrl>,
    ) -> Result<Vec<(CanonicalUrl, String)>, CrawlError> {
        let results = self.dispatch(urls, Method::Get).await?;
        let mut pages = Vec::with_capacity(results.len());

        for (url, joined) in results {
            let outcome = match joined {
                Ok(result) => fetch_outcome(result),
                Err(reason) => {
                    tracing::warn!("Fetch task for {} failed: {}", url, reason);
                    FetchOutcome::Dropped { reason }
                }
            };

            match outcome {
                FetchOutcome::Page(body) => {
                    self.stats.pages_fetched += 1;
                    pages.push((url, body));
                }
                FetchOutcome::Dropped { reason } => {
                    tracing::debug!("Dropping {}: {}", url, reason);
                    self.stats.fetch_failures += 1;
                }
            }
        }

        Ok(pages)
    }

    /// Spawns one gated request per URL and waits for all of them
    ///
    /// A gate permit is taken before each task is spawned and moved into it,
    /// so it is released when the task ends, including by panic. The `Err`
    /// side of each result describes a task that did not run to completion.
    async fn dispatch(
        &self,
        urls: impl IntoIterator<Item = CanonicalUrl>,
        method: Method,
    ) -> Result<Vec<(CanonicalUrl, Result<HttpResult, String>)>, CrawlError> {
        let mut targets = Vec::new();
        let mut handles: Vec<JoinHandle<HttpResult>> = Vec::new();

        for url in urls {
            let permit = self.gate.acquire().await?;
            let client = Arc::clone(&self.client);
            let profile = Arc::clone(&self.profile);
            let target = url.as_str().to_string();

            handles.push(tokio::spawn(async move {
                let _permit = permit;
                match method {
                    Method::Head => client.head(&target, &profile.headers, profile.timeout).await,
                    Method::Get => client.get(&target, &profile.headers, profile.timeout).await,
                }
            }));
            targets.push(url);
        }

        let joined = join_all(handles).await;

        Ok(targets
            .into_iter()
            .zip(joined.into_iter().map(|r| r.map_err(|e| e.to_string())))
            .collect())
    }

    /// Extracts links from a fetched page and admits the in-scope ones
    fn process_page(&mut self, page_url: &CanonicalUrl, body: &str) {
        self.reporter.page_started(page_url);

        let hrefs = self.extractor.extract_links(body);
        tracing::debug!("{} links found on {}", hrefs.len(), page_url);

        for href in &hrefs {
            self.stats.links_examined += 1;
            self.consider_link(page_url, href);
        }
    }

    /// Offers one href to the frontier
    ///
    /// The href is first tried as an absolute URL. Only when that attempt is
    /// rejected, and the href is root- or dot-relative, is it resolved against
    /// the page and tried again.
    fn consider_link(&mut self, page_url: &CanonicalUrl, href: &str) {
        match self.admit(canonicalize(href)) {
            Admission::Admitted | Admission::Duplicate => return,
            Admission::Rejected => {}
        }

        if is_followable_relative(href) {
            self.admit(resolve_relative(page_url.as_str(), href));
        }
    }

    fn admit(&mut self, candidate: Option<CanonicalUrl>) -> Admission {
        let Some(url) = candidate else {
            return Admission::Rejected;
        };

        if !in_scope(url.as_str(), &self.base_domain) {
            return Admission::Rejected;
        }

        if !self.frontier.try_admit(url.clone()) {
            return Admission::Duplicate;
        }

        self.stats.urls_admitted += 1;
        self.reporter.url_admitted(&url);
        Admission::Admitted
    }
}

/// Runs a complete crawl from `seed` with the production components
///
/// # Example
///
/// ```no_run
/// use site_sweep::config::Config;
/// use site_sweep::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stats = run_crawl("https://example.com", &Config::default()).await?;
/// println!("{} pages fetched", stats.pages_fetched);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(seed: &str, config: &Config) -> Result<CrawlStats, CrawlError> {
    let mut coordinator = Coordinator::new(seed, config)?;
    coordinator.run().await
}
