use std::fmt;
use url::Url;

/// A URL reduced to `scheme://authority/path`
///
/// Canonical URLs carry no query string, no fragment and no trailing slash. Two
/// URLs name the same page iff their canonical strings are identical. Instances
/// can only be produced by [`canonicalize`] and [`resolve_relative`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalUrl(String);

impl CanonicalUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns the host of this URL (no port)
    pub fn host(&self) -> Option<String> {
        super::host_of(&self.0)
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Produces the canonical form of a URL
///
/// # Canonicalization Steps
///
/// 1. Parse the URL; reject relative references and malformed input
/// 2. Reject URLs without a host (`mailto:`, `javascript:`, `data:` ...)
/// 3. Keep scheme, host and any explicit non-default port
/// 4. Keep the path, dropping every trailing slash (the root path becomes empty)
/// 5. Drop the query string and fragment
///
/// # Arguments
///
/// * `url_str` - The URL string to canonicalize
///
/// # Returns
///
/// * `Some(CanonicalUrl)` - The canonical form
/// * `None` - The input lacks a scheme or a host
///
/// # Examples
///
/// ```
/// use site_sweep::url::canonicalize;
///
/// let url = canonicalize("https://x.com/a/?id=1#frag").unwrap();
/// assert_eq!(url.as_str(), "https://x.com/a");
///
/// assert!(canonicalize("/relative/path").is_none());
/// ```
pub fn canonicalize(url_str: &str) -> Option<CanonicalUrl> {
    let url = Url::parse(url_str.trim()).ok()?;
    canonical_from_parsed(&url)
}

/// Resolves `candidate` against `base_url` and canonicalizes the result
///
/// Standard reference resolution applies: absolute paths, `.` and `..`
/// segments and protocol-relative (`//host/path`) references are all handled.
///
/// # Examples
///
/// ```
/// use site_sweep::url::resolve_relative;
///
/// let url = resolve_relative("https://x.com/dir/page", "/relative").unwrap();
/// assert_eq!(url.as_str(), "https://x.com/relative");
/// ```
pub fn resolve_relative(base_url: &str, candidate: &str) -> Option<CanonicalUrl> {
    let base = Url::parse(base_url).ok()?;
    let joined = base.join(candidate.trim()).ok()?;
    canonical_from_parsed(&joined)
}

fn canonical_from_parsed(url: &Url) -> Option<CanonicalUrl> {
    let host = url.host_str().filter(|h| !h.is_empty())?;

    let authority = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    let path = url.path().trim_end_matches('/');

    Some(CanonicalUrl(format!(
        "{}://{}{}",
        url.scheme(),
        authority,
        path
    )))
}
