//! Request DTOs for the HTTP API.

use serde::{Deserialize, Deserializer};

use crate::file::{NewFileRecord, DEFAULT_MIME_TYPE};

/// Query parameters for `GET /api/files`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesQuery {
    #[serde(default)]
    pub directory_id: Option<String>,
}

/// Query parameters for `GET /api/file-content`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContentQuery {
    #[serde(default)]
    pub file_id: Option<String>,
}

/// Body of `POST /api/files`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileRequest {
    #[serde(default)]
    pub directory_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Text content, embedded when no `dataUrl` is given.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Pre-built `data:` locator stored verbatim.
    #[serde(default)]
    pub data_url: Option<String>,
    /// Declared size in bytes; ignored unless a positive number.
    #[serde(default, deserialize_with = "numeric_size")]
    pub size: Option<i64>,
}

/// Accept any JSON value for `size`; only numbers are kept.
fn numeric_size<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(serde_json::Value::as_f64).map(|n| n as i64))
}

impl CreateFileRequest {
    /// Convert into a [`NewFileRecord`], or `None` when the directory or title is blank.
    ///
    /// The size falls back to the locator length when a locator is given, and
    /// to the UTF-8 byte length of the content otherwise.
    pub fn into_new_file_record(self) -> Option<NewFileRecord> {
        let directory_id = non_blank(self.directory_id)?;
        let title = non_blank(self.title)?;
        let mime_type = non_blank(self.mime_type).unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
        let data_url = non_blank(self.data_url);
        let content = self.content.unwrap_or_default();

        let size = match self.size {
            Some(size) if size > 0 => size as u64,
            _ => match &data_url {
                Some(locator) => locator.len() as u64,
                None => content.len() as u64,
            },
        };

        let mut record = NewFileRecord::new(directory_id, title, mime_type)
            .with_size(size)
            .with_content(content);
        if let Some(locator) = data_url {
            record = record.with_locator(locator);
        }
        Some(record)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
