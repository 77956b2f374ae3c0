//! File management core.
//!
//! This module provides:
//! - MIME type and extension inference from file names
//! - Storage locator classification (embedded `data:` or remote)
//! - Allowlist-gated remote text fetching
//! - Content resolution for a single file
//! - Parameterized query building and an owner-scoped repository

mod allowlist;
mod fetcher;
mod locator;
mod mime;
mod query;
mod record;
mod repository;
mod resolver;
mod service;

pub use allowlist::SourceAllowlist;
pub use fetcher::{
    FetchError, HttpTextFetcher, TextFetcher, ACCEPT_TEXT, DEFAULT_FETCH_TIMEOUT_SECS,
};
pub use locator::{StorageLocator, EMBEDDED_PREFIX};
pub use mime::{extension_of, is_text, mime_of, DEFAULT_EXTENSION, DEFAULT_MIME_TYPE};
pub use query::{
    build_get_by_id, build_get_by_storage_key, build_get_directory, build_insert_file,
    build_list, build_list_directories, build_list_directory_files, FileInsert, ListFilter,
    LookupOptions, ParentFilter, DEFAULT_LIMIT, MAX_LIMIT,
};
pub use record::{Directory, FileRecord, NewFileRecord, ResolvedContent};
pub use repository::{FileRepository, ROOT_DIRECTORY_NAME};
pub use resolver::ContentResolver;
pub use service::FileService;
