//! Remote text fetching for the content resolver.
//!
//! Fetches are bounded by a single total timeout, never reuse cached
//! responses, and are not retried. Redirects are not followed: the target of
//! a redirect has not been checked against the allowlist, so a 3xx answer is
//! reported as [`FetchError::Status`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use thiserror::Error;

use crate::{FiledeskError, Result};

/// Accept header sent with every text fetch.
pub const ACCEPT_TEXT: &str = "text/plain, text/*;q=0.9, */*;q=0.5";

/// Default total timeout for a fetch in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

/// User agent string for fetches.
const USER_AGENT: &str = concat!("filedesk/", env!("CARGO_PKG_VERSION"));

/// Why a fetch produced no body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("upstream returned HTTP {0}")]
    Status(u16),
    /// Connection, timeout, or body decoding failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Fetches a remote resource as text.
///
/// Dropping the returned future cancels that fetch only.
#[async_trait]
pub trait TextFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> std::result::Result<String, FetchError>;
}

/// reqwest-backed [`TextFetcher`].
#[derive(Debug, Clone)]
pub struct HttpTextFetcher {
    client: Client,
}

impl HttpTextFetcher {
    /// Create a fetcher with the given total timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_TEXT));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| FiledeskError::Http(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Create a fetcher with the default 15 second timeout.
    pub fn with_default_timeout() -> Result<Self> {
        Self::new(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS))
    }
}

#[async_trait]
impl TextFetcher for HttpTextFetcher {
    async fn fetch_text(&self, url: &str) -> std::result::Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}
