//! Row shape of the `files` table.

use chrono::{DateTime, Utc};

/// One row of the `files` table (folder or file).
///
/// UUID columns are selected as text (`id::text AS id`), so ids are plain strings here.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct FilesTableRow {
    pub id: String,
    pub user_id: String,
    pub file_name: String,
    pub original_name: String,
    /// Storage locator (embedded `data:` URL or remote URL).
    pub storage_url: Option<String>,
    pub storage_key: String,
    pub mime_type: Option<String>,
    pub file_size: Option<i64>,
    pub parent_id: Option<String>,
    pub is_folder: bool,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
