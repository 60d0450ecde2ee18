//! Frontier of pending URLs and the dedup ledger behind it

use crate::url::CanonicalUrl;
use std::collections::HashSet;

/// URLs waiting to be crawled plus every URL ever admitted
///
/// `pending` is always a subset of `seen`. `seen` only grows: a URL that was
/// dropped (not HTML, failed fetch) is never admitted again.
#[derive(Debug, Default)]
pub struct Frontier {
    seen: HashSet<CanonicalUrl>,
    pending: HashSet<CanonicalUrl>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits a URL that has never been seen
    ///
    /// # Returns
    ///
    /// * `true` - The URL was new and is now pending
    /// * `false` - The URL was admitted before; nothing changed
    pub fn try_admit(&mut self, url: CanonicalUrl) -> bool {
        if self.seen.contains(&url) {
            return false;
        }

        self.seen.insert(url.clone());
        self.pending.insert(url);
        true
    }

    /// Removes and returns every pending URL as one round of work
    pub fn take_round(&mut self) -> HashSet<CanonicalUrl> {
        std::mem::take(&mut self.pending)
    }

    /// Returns whether no URLs are pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of pending URLs
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Number of URLs ever admitted
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn has_seen(&self, url: &CanonicalUrl) -> bool {
        self.seen.contains(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::canonicalize;

    fn url(s: &str) -> CanonicalUrl {
        canonicalize(s).unwrap()
    }

    #[test]
    fn test_new_frontier_is_empty() {
        let frontier = Frontier::new();
        assert!(frontier.is_empty());
        assert_eq!(frontier.len(), 0);
        assert_eq!(frontier.seen_count(), 0);
    }

    #[test]
    fn test_admit_once() {
        let mut frontier = Frontier::new();

        assert!(frontier.try_admit(url("https://x.com/a")));
        assert!(!frontier.try_admit(url("https://x.com/a")));
        assert!(!frontier.try_admit(url("https://x.com/a/?q=1")));

        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.seen_count(), 1);
    }

    #[test]
    fn test_take_round_drains_pending() {
        let mut frontier = Frontier::new();
        frontier.try_admit(url("https://x.com/a"));
        frontier.try_admit(url("https://x.com/b"));

        let batch = frontier.take_round();

        assert_eq!(batch.len(), 2);
        assert!(frontier.is_empty());
        assert_eq!(frontier.seen_count(), 2);
    }

    #[test]
    fn test_no_readmission_after_round() {
        let mut frontier = Frontier::new();
        frontier.try_admit(url("https://x.com/a"));
        frontier.take_round();

        assert!(!frontier.try_admit(url("https://x.com/a")));
        assert!(frontier.is_empty());
        assert!(frontier.has_seen(&url("https://x.com/a")));
    }

    #[test]
    fn test_dedup_over_admission_sequence() {
        let mut frontier = Frontier::new();
        let inputs = [
            "https://x.com/a",
            "https://x.com/b",
            "https://x.com/a/",
            "https://x.com/c",
            "https://x.com/b#frag",
            "https://x.com/a",
        ];

        let mut accepted = Vec::new();
        for (i, input) in inputs.iter().enumerate() {
            let candidate = url(input);
            if frontier.try_admit(candidate.clone()) {
                accepted.push(candidate);
            }
            if i % 2 == 1 {
                frontier.take_round();
            }
        }

        let unique: HashSet<_> = accepted.iter().cloned().collect();
        assert_eq!(accepted.len(), unique.len());
        assert_eq!(accepted.len(), 3);
    }

    #[test]
    fn test_pending_subset_of_seen() {
        let mut frontier = Frontier::new();
        frontier.try_admit(url("https://x.com/a"));
        frontier.take_round();
        frontier.try_admit(url("https://x.com/b"));
        frontier.try_admit(url("https://x.com/c"));

        let pending = frontier.take_round();
        for member in &pending {
            assert!(frontier.has_seen(member));
        }
    }
}
