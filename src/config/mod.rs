//! Configuration module for site-sweep
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! The file is optional; command-line flags may override any value.
//!
//! # Example
//!
//! ```no_run
//! use site_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sweep.toml")).unwrap();
//! println!("Crawler will use {} concurrent requests", config.crawler.concurrency_limit);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, UserAgentConfig, DEFAULT_CONCURRENCY_LIMIT,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};

pub use parser::{load_config, parse_config};
pub use validation::validate;
