//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The frontier of pending URLs and its dedup ledger
//! - The concurrency gate bounding outbound requests
//! - The HTTP and link-extraction seams
//! - Per-request outcome policy
//! - Round-based crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod gate;
mod parser;
mod policy;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{
    HttpClient, HttpResponse, HttpResult, ReqwestClient, RequestProfile, TransportError,
};
pub use frontier::Frontier;
pub use gate::{ConcurrencyGate, GatePermit};
pub use parser::{extract_links, HtmlLinkExtractor, LinkExtractor};
pub use policy::{
    classify_response, fetch_outcome, is_html_media_type, Classification, FetchOutcome,
};
