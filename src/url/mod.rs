//! URL handling module for site-sweep
//!
//! This module provides canonicalization, host extraction, relative reference
//! resolution and the same-host scope policy.

mod domain;
mod normalize;
mod scope;

// Re-export main functions
pub use domain::{host_of, is_valid_url};
pub use normalize::{canonicalize, resolve_relative, CanonicalUrl};
pub use scope::{in_scope, is_followable_relative};
