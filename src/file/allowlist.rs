//! Allowlist of remote sources the content resolver may fetch.
//!
//! The resolver fetches with the service's own network identity, so a
//! locator pointing anywhere else must never trigger a request. Membership is
//! an exact string match against fully-qualified URLs.

use std::collections::HashSet;

/// Fixed set of permitted remote URLs.
#[derive(Debug, Clone, Default)]
pub struct SourceAllowlist {
    urls: HashSet<String>,
}

impl SourceAllowlist {
    /// Create an allowlist from the given URLs.
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `url` is exactly one of the permitted URLs.
    pub fn is_allowed(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
