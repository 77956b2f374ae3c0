//! Query-execution capability.
//!
//! The file repository never talks to sqlx directly: it hands a fully built
//! [`SqlQuery`] to a [`QueryExecutor`]. [`Database`] is the production
//! executor; tests substitute their own.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{Database, FilesTableRow};
use crate::Result;

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i64),
    Timestamp(DateTime<Utc>),
    /// SQL NULL. The query text casts the placeholder to the column type.
    Null,
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// Query text with `$n` placeholders plus the values bound to them, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub text: String,
    pub params: Vec<SqlValue>,
}

/// Runs a query and returns the resulting `files` rows.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn fetch_rows(&self, query: &SqlQuery) -> Result<Vec<FilesTableRow>>;
}

#[async_trait]
impl QueryExecutor for Database {
    async fn fetch_rows(&self, query: &SqlQuery) -> Result<Vec<FilesTableRow>> {
        let mut statement = sqlx::query_as::<_, FilesTableRow>(&query.text);
        for value in &query.params {
            statement = match value {
                SqlValue::Text(s) => statement.bind(s.clone()),
                SqlValue::Int(i) => statement.bind(*i),
                SqlValue::Timestamp(t) => statement.bind(*t),
                SqlValue::Null => statement.bind(Option::<String>::None),
            };
        }

        let rows = statement.fetch_all(self.pool()).await?;
        Ok(rows)
    }
}
