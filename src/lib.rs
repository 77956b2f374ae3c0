//! filedesk - file management backend core.
//!
//! Directories and files live in a single Postgres `files` table. Content is
//! resolved from embedded `data:` locators or, for allow-listed sources, by
//! fetching the remote text.

pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use config::Config;
pub use db::{Database, QueryExecutor};
pub use error::{FiledeskError, Result};
pub use file::{
    ContentResolver, Directory, FileRecord, FileService, NewFileRecord, ResolvedContent,
    SourceAllowlist, StorageLocator,
};
