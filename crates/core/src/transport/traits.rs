use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ClientError;

/// An in-memory file the user selected for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    /// MIME type as reported by the picker (e.g. "image/png").
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Trait abstraction over the one configured HTTP client.
///
/// Every screen and the session context depend on this seam, never on a
/// concrete client, so tests can script server behavior exactly and a
/// different transport (or target) swaps in without touching the rest
/// of the codebase.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ApiTransport: Send + Sync {
    /// GET a JSON resource. `query` already holds only the parameters to
    /// send — callers omit empty filter fields rather than passing blanks.
    async fn get_json(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Value, ClientError>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ClientError>;

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ClientError>;

    async fn delete(&self, path: &str) -> Result<(), ClientError>;

    /// GET a binary payload (the CSV export).
    async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ClientError>;

    /// POST one file as a multipart form (the profile photo).
    async fn post_file(
        &self,
        path: &str,
        field: &str,
        upload: FileUpload,
    ) -> Result<Value, ClientError>;
}
