//! File service: owner-scoped repository access plus content resolution.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use super::allowlist::SourceAllowlist;
use super::fetcher::{HttpTextFetcher, TextFetcher};
use super::query::ListFilter;
use super::record::{Directory, FileRecord, NewFileRecord, ResolvedContent};
use super::repository::FileRepository;
use super::resolver::ContentResolver;
use crate::config::FilesConfig;
use crate::db::QueryExecutor;
use crate::{FiledeskError, Result};

/// Entry point for every file operation, scoped to one owner.
#[derive(Clone)]
pub struct FileService {
    executor: Arc<dyn QueryExecutor>,
    resolver: ContentResolver,
    owner: String,
}

impl FileService {
    /// Create a new FileService.
    pub fn new(
        executor: Arc<dyn QueryExecutor>,
        resolver: ContentResolver,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            executor,
            resolver,
            owner: owner.into(),
        }
    }

    /// Create a FileService with an HTTP fetcher built from configuration.
    pub fn from_config(executor: Arc<dyn QueryExecutor>, config: &FilesConfig) -> Result<Self> {
        let fetcher = HttpTextFetcher::new(Duration::from_secs(config.fetch_timeout_secs))?;
        Ok(Self::with_fetcher(executor, config, Arc::new(fetcher)))
    }

    /// Create a FileService from configuration with a custom fetcher.
    pub fn with_fetcher(
        executor: Arc<dyn QueryExecutor>,
        config: &FilesConfig,
        fetcher: Arc<dyn TextFetcher>,
    ) -> Self {
        let allowlist = SourceAllowlist::new(&config.allowed_source_urls);
        info!(
            owner = %config.owner_id,
            allowed_sources = allowlist.len(),
            "File service configured"
        );
        Self::new(
            executor,
            ContentResolver::new(allowlist, fetcher),
            config.owner_id.clone(),
        )
    }

    /// Owner every query is scoped to.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    fn repo(&self) -> FileRepository<'_> {
        FileRepository::new(self.executor.as_ref(), &self.owner)
    }

    pub async fn list_directories(&self) -> Result<Vec<Directory>> {
        self.repo().list_directories().await
    }

    pub async fn list_files(&self, directory_id: &str) -> Result<Vec<FileRecord>> {
        self.repo().list_files(directory_id).await
    }

    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<FileRecord>> {
        self.repo().list(filter).await
    }

    pub async fn get_by_storage_key(&self, storage_key: &str) -> Result<Option<FileRecord>> {
        self.repo().get_by_storage_key(storage_key).await
    }

    pub async fn create_file_record(&self, new_file: &NewFileRecord) -> Result<FileRecord> {
        let file = self.repo().create(new_file).await?;
        info!(file_id = %file.id, name = %file.name, "Created file record");
        Ok(file)
    }

    /// Resolve a file's content by ID.
    pub async fn resolve_file_content(&self, file_id: &str) -> Result<ResolvedContent> {
        let file = self
            .repo()
            .get_by_id(file_id)
            .await?
            .ok_or_else(|| FiledeskError::NotFound("file".to_string()))?;

        debug!(file_id = %file.id, mime_type = %file.mime_type, "Resolving file content");
        Ok(self.resolver.resolve(&file).await)
    }
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService")
            .field("owner", &self.owner)
            .field("resolver", &self.resolver)
            .finish()
    }
}
