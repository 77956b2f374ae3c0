//! Directory and file records materialized from `files` rows.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::mime::{extension_of, mime_of};
use crate::db::FilesTableRow;

/// A directory (folder row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    pub id: String,
    pub name: String,
    /// Parent directory ID (None for root directories).
    pub parent_id: Option<String>,
}

impl From<FilesTableRow> for Directory {
    fn from(row: FilesTableRow) -> Self {
        Self {
            id: row.id,
            name: row.file_name,
            parent_id: row.parent_id,
        }
    }
}

/// A file with its derived extension and effective MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub storage_key: String,
    /// Parent directory ID (None for top-level files).
    pub directory_id: Option<String>,
    pub size: u64,
    pub extension: String,
    pub mime_type: String,
    pub updated_at: DateTime<Utc>,
    /// Raw storage locator; classify with [`super::StorageLocator::classify`].
    pub storage_locator: Option<String>,
    pub is_public: bool,
}

impl From<FilesTableRow> for FileRecord {
    fn from(row: FilesTableRow) -> Self {
        let extension = extension_of(&row.file_name);
        let mime_type = mime_of(&row.file_name, row.mime_type.as_deref());
        Self {
            id: row.id,
            name: row.file_name,
            storage_key: row.storage_key,
            directory_id: row.parent_id,
            size: row.file_size.unwrap_or(0).max(0) as u64,
            extension,
            mime_type,
            updated_at: row.updated_at,
            storage_locator: row.storage_url,
            is_public: row.is_public,
        }
    }
}

/// Readable view of one file's content.
///
/// Any of the three content fields may be absent; see
/// [`super::ContentResolver::resolve`] for when each is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedContent {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub text_content: Option<String>,
    /// Self-contained locator, or a public remote URL usable as a direct link.
    pub embedded_locator: Option<String>,
    pub source_url: Option<String>,
}

/// Data for creating a new file record.
#[derive(Debug, Clone, Default)]
pub struct NewFileRecord {
    pub directory_id: String,
    /// Display name; also used as original name and storage key.
    pub title: String,
    /// Declared MIME type; inferred from the title when empty.
    pub mime_type: String,
    pub size: Option<u64>,
    /// Locator to store verbatim.
    pub embedded_locator: Option<String>,
    /// Text content to embed when no locator is given.
    pub content: Option<String>,
}

impl NewFileRecord {
    /// Create a new record request.
    pub fn new(
        directory_id: impl Into<String>,
        title: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            directory_id: directory_id.into(),
            title: title.into(),
            mime_type: mime_type.into(),
            ..Default::default()
        }
    }

    /// Set the size in bytes.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the locator to store.
    pub fn with_locator(mut self, locator: impl Into<String>) -> Self {
        self.embedded_locator = Some(locator.into());
        self
    }

    /// Set the text content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}
