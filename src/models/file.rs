//! File upload options and responses for the Files v3 API.

use serde::{Deserialize, Serialize};

/// Visibility of an uploaded file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileAccess {
    PublicIndexable,
    PublicNotIndexable,
    Private,
}

/// The `options` part of an upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadOptions {
    pub access: FileAccess,
    pub overwrite: bool,
    pub duplicate_validation_strategy: String,
    pub duplicate_validation_scope: String,
}

impl Default for FileUploadOptions {
    fn default() -> Self {
        Self {
            access: FileAccess::Private,
            overwrite: true,
            duplicate_validation_strategy: "NONE".to_string(),
            duplicate_validation_scope: "EXACT_FOLDER".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct FileAccessUpdate {
    pub access: FileAccess,
}

/// The fields of a file record this client reads.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadResponse {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub access: Option<FileAccess>,
}
