//! API handlers.

pub mod file;

pub use file::*;

use crate::file::FileService;

/// Application state shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// File service scoped to the configured owner.
    pub files: FileService,
}

impl AppState {
    /// Create a new application state.
    pub fn new(files: FileService) -> Self {
        Self { files }
    }
}
