//! Configuration module for filedesk.

use serde::Deserialize;
use std::path::Path;

use crate::{FiledeskError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins (empty allows any origin).
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection URL. Must be set before the server starts.
    #[serde(default)]
    pub url: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
        }
    }
}

/// File access configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Owner identity every query is scoped to.
    #[serde(default = "default_owner_id")]
    pub owner_id: String,
    /// Remote URLs the content resolver may fetch (exact match).
    #[serde(default = "default_allowed_source_urls")]
    pub allowed_source_urls: Vec<String>,
    /// Timeout for remote text fetches in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

fn default_owner_id() -> String {
    "8199889776".to_string()
}

fn default_allowed_source_urls() -> Vec<String> {
    [
        "https://sample-files.com/downloads/documents/txt/simple.txt",
        "https://sample-files.com/downloads/documents/txt/long-doc.txt",
        "https://sample-files.com/downloads/documents/txt/ascii-art.txt",
        "https://sample-files.com/downloads/documents/txt/data.txt",
        "https://sample-files.com/downloads/documents/txt/multilang.txt",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_fetch_timeout() -> u64 {
    15
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            owner_id: default_owner_id(),
            allowed_source_urls: default_allowed_source_urls(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/filedesk.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// File access configuration.
    #[serde(default)]
    pub files: FilesConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(FiledeskError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| FiledeskError::Validation(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `DATABASE_URL`: Override the database connection URL
    /// - `FILE_USER_ID`: Override the owner identity
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.is_empty() {
                self.database.url = url;
            }
        }
        if let Ok(owner_id) = std::env::var("FILE_USER_ID") {
            if !owner_id.is_empty() {
                self.files.owner_id = owner_id;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The database URL is not set
    /// - The owner identity is empty
    pub fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(FiledeskError::Config(
                "database url is not set. \
                 Set it in config.toml or via DATABASE_URL environment variable."
                    .to_string(),
            ));
        }
        if self.files.owner_id.is_empty() {
            return Err(FiledeskError::Config("files.owner_id is empty".to_string()));
        }
        Ok(())
    }
}
