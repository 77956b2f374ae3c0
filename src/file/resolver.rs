//! Content resolution for a single file.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::allowlist::SourceAllowlist;
use super::fetcher::TextFetcher;
use super::locator::StorageLocator;
use super::mime::{is_text, mime_of};
use super::record::{FileRecord, ResolvedContent};

/// Turns a file's storage locator into readable content.
///
/// Resolution never fails: a disallowed, unreachable, or corrupt source
/// yields a result with fewer fields set.
#[derive(Clone)]
pub struct ContentResolver {
    allowlist: SourceAllowlist,
    fetcher: Arc<dyn TextFetcher>,
}

impl ContentResolver {
    /// Create a resolver that fetches allow-listed URLs with `fetcher`.
    pub fn new(allowlist: SourceAllowlist, fetcher: Arc<dyn TextFetcher>) -> Self {
        Self { allowlist, fetcher }
    }

    /// Resolve the content of `file`.
    ///
    /// - No locator: only the identity fields are set.
    /// - Embedded: `embedded_locator` is the stored locator; `text_content` is
    ///   set when the embedded type is text and the payload is valid UTF-8.
    /// - Remote: `source_url` is always set. Text files are fetched only when
    ///   the URL is allow-listed; public non-text files expose the URL as
    ///   `embedded_locator` without fetching.
    pub async fn resolve(&self, file: &FileRecord) -> ResolvedContent {
        let mime_type = mime_of(&file.name, Some(file.mime_type.as_str()));
        let mut resolved = ResolvedContent {
            id: file.id.clone(),
            name: file.name.clone(),
            mime_type,
            text_content: None,
            embedded_locator: None,
            source_url: None,
        };

        match StorageLocator::classify(file.storage_locator.as_deref()) {
            StorageLocator::Empty => {}
            StorageLocator::Embedded {
                locator,
                mime_type,
                bytes,
            } => {
                resolved.embedded_locator = Some(locator.to_string());
                if is_text(&mime_type) {
                    match String::from_utf8(bytes) {
                        Ok(text) => resolved.text_content = Some(text),
                        Err(_) => debug!(file_id = %file.id, "Embedded text is not valid UTF-8"),
                    }
                }
            }
            StorageLocator::Remote { url } => {
                resolved.source_url = Some(url.to_string());
                if is_text(&resolved.mime_type) {
                    resolved.text_content = self.fetch_allowed(&file.id, url).await;
                } else if file.is_public {
                    resolved.embedded_locator = Some(url.to_string());
                }
            }
        }

        resolved
    }

    async fn fetch_allowed(&self, file_id: &str, url: &str) -> Option<String> {
        if !self.allowlist.is_allowed(url) {
            info!(file_id = %file_id, url = %url, "Remote source is not allow-listed; skipping fetch");
            return None;
        }

        match self.fetcher.fetch_text(url).await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(file_id = %file_id, url = %url, error = %e, "Remote fetch failed");
                None
            }
        }
    }
}

impl std::fmt::Debug for ContentResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentResolver")
            .field("allowlist", &self.allowlist)
            .finish()
    }
}
