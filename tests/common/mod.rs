//! Test helpers for integration tests.
//!
//! Provides a scripted query executor, a counting fetcher, and row builders.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;

use filedesk::config::FilesConfig;
use filedesk::db::{FilesTableRow, SqlQuery};
use filedesk::file::{FetchError, TextFetcher};
use filedesk::web::{create_router, AppState};
use filedesk::{FileService, QueryExecutor};

pub const OWNER: &str = "8199889776";
pub const ROOT_ID: &str = "5c1f7d9e-2b3a-4c6d-8e9f-0a1b2c3d4e5f";
pub const DOCS_ID: &str = "7a2e0c11-8f3b-4d5e-9a6c-1b2d3e4f5a6b";
pub const FILE_ID: &str = "0b7e4c2a-4d0e-4a57-9f55-1f4b6f1d2a01";
pub const ALLOWED_URL: &str = "https://sample-files.com/downloads/documents/txt/simple.txt";

/// Executor replaying queued result sets in order and recording every query.
#[derive(Default)]
pub struct ScriptedExecutor {
    responses: Mutex<VecDeque<Vec<FilesTableRow>>>,
    queries: Mutex<Vec<SqlQuery>>,
}

impl ScriptedExecutor {
    pub fn new(responses: Vec<Vec<FilesTableRow>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn queries(&self) -> Vec<SqlQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn fetch_rows(&self, query: &SqlQuery) -> filedesk::Result<Vec<FilesTableRow>> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(self.responses.lock().unwrap().pop_front().unwrap_or_default())
    }
}

/// Fetcher returning a fixed body and counting calls.
pub struct CountingFetcher {
    body: String,
    calls: AtomicUsize,
}

impl CountingFetcher {
    pub fn new(body: &str) -> Arc<Self> {
        Arc::new(Self {
            body: body.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextFetcher for CountingFetcher {
    async fn fetch_text(&self, _url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.body.clone())
    }
}

/// Create a test server over the given executor and fetcher.
pub fn create_test_server(
    executor: Arc<ScriptedExecutor>,
    fetcher: Arc<CountingFetcher>,
) -> TestServer {
    let files = FileService::with_fetcher(executor, &FilesConfig::default(), fetcher);
    let router = create_router(Arc::new(AppState::new(files)), &[]);
    TestServer::new(router).expect("Failed to create test server")
}

/// A live folder row.
pub fn folder_row(id: &str, name: &str, parent_id: Option<&str>) -> FilesTableRow {
    FilesTableRow {
        is_folder: true,
        ..file_row(id, name, parent_id, None)
    }
}

/// A live public file row.
pub fn file_row(
    id: &str,
    name: &str,
    parent_id: Option<&str>,
    storage_url: Option<&str>,
) -> FilesTableRow {
    let now = Utc::now();
    FilesTableRow {
        id: id.to_string(),
        user_id: OWNER.to_string(),
        file_name: name.to_string(),
        original_name: name.to_string(),
        storage_url: storage_url.map(str::to_string),
        storage_key: name.to_string(),
        mime_type: None,
        file_size: Some(0),
        parent_id: parent_id.map(str::to_string),
        is_folder: false,
        is_public: true,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}
