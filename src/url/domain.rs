use url::Url;

/// Extracts the host from a URL string
///
/// The port is not part of the result, so every port on a host shares one
/// scope.
///
/// # Arguments
///
/// * `url` - The URL to extract the host from
///
/// # Returns
///
/// * `Some(String)` - The host
/// * `None` - The URL does not parse or has no host
///
/// # Examples
///
/// ```
/// use site_sweep::url::host_of;
///
/// assert_eq!(host_of("https://sub.example.com/path"), Some("sub.example.com".to_string()));
/// assert_eq!(host_of("https://example.com:8080/"), Some("example.com".to_string()));
/// assert_eq!(host_of("/no/host"), None);
/// ```
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .host_str()
        .filter(|h| !h.is_empty())
        .map(str::to_string)
}

/// Returns true if the URL has both a scheme and a host
pub fn is_valid_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            !parsed.scheme().is_empty() && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}
