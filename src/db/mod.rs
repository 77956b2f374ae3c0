//! Database module for filedesk.
//!
//! This module provides Postgres connectivity (via sqlx), the `files` table
//! schema, and the query-execution capability the file repository runs on.

mod executor;
mod row;
mod schema;

pub use executor::{QueryExecutor, SqlQuery, SqlValue};
pub use row::FilesTableRow;
pub use schema::MIGRATIONS;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::{FiledeskError, Result};

/// Database pool type.
pub type DbPool = PgPool;

/// Database wrapper owning the connection pool.
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Connect to the database described by the configuration.
    ///
    /// Fails immediately with a configuration error when no URL is set; the
    /// server must not start without a backing store.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(FiledeskError::Config("DATABASE_URL is not set".to_string()));
        }

        info!(
            max_connections = config.max_connections,
            "Connecting to database"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| FiledeskError::DatabaseConnection(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Apply the schema migrations.
    ///
    /// Every migration is idempotent, so this is safe to run on each start.
    pub async fn migrate(&self) -> Result<()> {
        for (i, migration) in MIGRATIONS.iter().enumerate() {
            debug!("Applying migration v{}", i + 1);
            sqlx::raw_sql(migration).execute(&self.pool).await?;
        }
        info!("Database schema is up to date (version {})", MIGRATIONS.len());
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish()
    }
}
