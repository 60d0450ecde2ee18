use super::domain::{host_of, is_valid_url};

/// Returns true if `candidate` may be crawled from a run rooted at `base_domain`
///
/// The candidate must be a valid URL whose host equals `base_domain` exactly.
/// Subdomains are a different host and therefore out of scope.
///
/// # Examples
///
/// ```
/// use site_sweep::url::in_scope;
///
/// assert!(in_scope("https://example.com/x", "example.com"));
/// assert!(!in_scope("https://analytics.example.com/x", "example.com"));
/// ```
pub fn in_scope(candidate: &str, base_domain: &str) -> bool {
    is_valid_url(candidate) && host_of(candidate).as_deref() == Some(base_domain)
}

/// Returns true if a raw href may be resolved against its page
///
/// Only root-relative (`/path`) and dot-relative (`./path`) references qualify.
/// Bare (`page.html`) and parent-relative (`../page`) references are not
/// followed.
pub fn is_followable_relative(href: &str) -> bool {
    href.starts_with('/') || href.starts_with("./")
}
