//! Database schema for filedesk.
//!
//! A single `files` table holds both folders and files; `is_folder`
//! disambiguates them and `deleted_at` marks soft-deleted rows.

/// Database migrations, applied in order.
pub const MIGRATIONS: &[&str] = &[
    // v1: files table
    r#"
CREATE EXTENSION IF NOT EXISTS pgcrypto;

CREATE TABLE IF NOT EXISTS files (
    id             UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id        TEXT NOT NULL,
    file_name      TEXT NOT NULL,
    original_name  TEXT NOT NULL,
    storage_url    TEXT,                 -- storage locator: data: URL or remote URL
    storage_key    TEXT NOT NULL,
    mime_type      TEXT,
    file_size      BIGINT,
    parent_id      UUID REFERENCES files(id),
    is_folder      BOOLEAN NOT NULL DEFAULT FALSE,
    is_public      BOOLEAN NOT NULL DEFAULT FALSE,
    created_at     TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at     TIMESTAMPTZ NOT NULL DEFAULT now(),
    deleted_at     TIMESTAMPTZ
);

CREATE INDEX IF NOT EXISTS idx_files_user_parent ON files(user_id, parent_id);
CREATE INDEX IF NOT EXISTS idx_files_storage_key ON files(storage_key);
CREATE INDEX IF NOT EXISTS idx_files_updated_at ON files(updated_at);
"#,
];
