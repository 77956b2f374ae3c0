//! Directory and file repository over a [`QueryExecutor`].

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use super::locator::StorageLocator;
use super::mime::mime_of;
use super::query::{
    build_get_by_id, build_get_by_storage_key, build_get_directory, build_insert_file,
    build_list, build_list_directories, build_list_directory_files, FileInsert, ListFilter,
    LookupOptions,
};
use super::record::{Directory, FileRecord, NewFileRecord};
use crate::db::{FilesTableRow, QueryExecutor};
use crate::{FiledeskError, Result};

/// Name of the top-level directory whose listing also includes parentless files.
pub const ROOT_DIRECTORY_NAME: &str = "root";

/// Repository for the `files` table, scoped to one owner.
pub struct FileRepository<'a> {
    executor: &'a dyn QueryExecutor,
    owner: &'a str,
}

impl<'a> FileRepository<'a> {
    /// Create a new FileRepository for `owner`.
    pub fn new(executor: &'a dyn QueryExecutor, owner: &'a str) -> Self {
        Self { executor, owner }
    }

    /// Run a filtered listing. The filter's owner is replaced by the repository's.
    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<FileRecord>> {
        let filter = ListFilter {
            owner: self.owner.to_string(),
            ..filter.clone()
        };
        let rows = self.executor.fetch_rows(&build_list(&filter)).await?;
        Ok(rows.into_iter().map(FileRecord::from).collect())
    }

    /// List all live directories, newest first.
    pub async fn list_directories(&self) -> Result<Vec<Directory>> {
        let rows = self
            .executor
            .fetch_rows(&build_list_directories(self.owner))
            .await?;
        Ok(rows.into_iter().map(Directory::from).collect())
    }

    /// Get a live directory by ID.
    pub async fn get_directory(&self, id: &str) -> Result<Option<Directory>> {
        if !is_uuid(id) {
            return Ok(None);
        }
        let row = self
            .first(self.executor.fetch_rows(&build_get_directory(id, self.owner)).await?)
            .filter(|row| row.is_folder);
        Ok(row.map(Directory::from))
    }

    /// List the live files of a directory, newest first.
    ///
    /// An unknown directory yields an empty list. The top-level directory
    /// named `root` also lists files that have no parent.
    pub async fn list_files(&self, directory_id: &str) -> Result<Vec<FileRecord>> {
        let directory = match self.get_directory(directory_id).await? {
            Some(directory) => directory,
            None => {
                debug!(directory_id = %directory_id, "Directory not found; listing nothing");
                return Ok(Vec::new());
            }
        };

        let include_top_level = directory.parent_id.is_none()
            && directory.name.eq_ignore_ascii_case(ROOT_DIRECTORY_NAME);

        let rows = self
            .executor
            .fetch_rows(&build_list_directory_files(
                self.owner,
                &directory.id,
                include_top_level,
            ))
            .await?;
        Ok(rows.into_iter().map(FileRecord::from).collect())
    }

    /// Get a live file or folder by ID.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<FileRecord>> {
        if !is_uuid(id) {
            return Ok(None);
        }
        let rows = self
            .executor
            .fetch_rows(&build_get_by_id(id, &LookupOptions::scoped(self.owner)))
            .await?;
        Ok(self.first(rows).map(FileRecord::from))
    }

    /// Get a live file or folder by storage key.
    pub async fn get_by_storage_key(&self, storage_key: &str) -> Result<Option<FileRecord>> {
        let rows = self
            .executor
            .fetch_rows(&build_get_by_storage_key(
                storage_key,
                &LookupOptions::scoped(self.owner),
            ))
            .await?;
        Ok(self.first(rows).map(FileRecord::from))
    }

    /// Create a new public file in a directory.
    ///
    /// The locator is stored verbatim when given; otherwise non-empty
    /// `content` is embedded as a `data:` locator.
    pub async fn create(&self, new_file: &NewFileRecord) -> Result<FileRecord> {
        let directory_id = new_file.directory_id.trim();
        let title = new_file.title.trim();
        if directory_id.is_empty() || title.is_empty() {
            return Err(FiledeskError::Validation(
                "directoryId and title are required".to_string(),
            ));
        }
        if !is_uuid(directory_id) {
            return Err(FiledeskError::Validation(
                "directoryId must be a UUID".to_string(),
            ));
        }

        let mime_type = mime_of(title, Some(new_file.mime_type.trim()));
        let locator = match new_file.embedded_locator.as_deref() {
            Some(locator) if !locator.is_empty() => Some(locator.to_string()),
            _ => new_file
                .content
                .as_deref()
                .filter(|content| !content.is_empty())
                .map(|content| StorageLocator::embed(&mime_type, content.as_bytes())),
        };

        let insert = FileInsert {
            owner: self.owner,
            name: title,
            storage_locator: locator.as_deref(),
            mime_type: &mime_type,
            size: new_file.size.map(|s| s.min(i64::MAX as u64) as i64),
            directory_id,
            now: Utc::now(),
        };

        let rows = self.executor.fetch_rows(&build_insert_file(&insert)).await?;
        self.first(rows)
            .map(FileRecord::from)
            .ok_or_else(|| FiledeskError::Database("insert returned no row".to_string()))
    }

    fn first(&self, rows: Vec<FilesTableRow>) -> Option<FilesTableRow> {
        rows.into_iter().next()
    }
}

/// IDs are UUIDs in storage; anything else cannot match a row.
fn is_uuid(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}
