use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::{ApiTransport, FileUpload};
use crate::errors::ClientError;

/// reqwest-backed transport over a single base URL.
///
/// Credentials travel as a session cookie. On native targets the client
/// keeps its own cookie store; on wasm the browser manages cookies and
/// request timeouts itself.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .timeout(Duration::from_secs(30))
            .cookie_store(true);
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// The configured base URL, without a trailing slash. Shells use
    /// this to build absolute asset links (e.g. the profile photo).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a reply: 2xx → JSON value (`Null` for an empty body, as the
    /// logout and delete endpoints return void); anything else → the
    /// server's structured error body as `ClientError::Api`.
    async fn decode(resp: reqwest::Response) -> Result<Value, ClientError> {
        let status = resp.status();
        let text = resp.text().await?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_str(&text).map_err(|e| ClientError::Serialization(e.to_string()))
        } else {
            Err(ClientError::api_from_body(status.as_u16(), &text))
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ApiTransport for HttpTransport {
    async fn get_json(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Value, ClientError> {
        let resp = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        Self::decode(resp).await
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        let resp = self.client.put(self.url(path)).json(body).send().await?;
        Self::decode(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let resp = self.client.delete(self.url(path)).send().await?;
        Self::decode(resp).await?;
        Ok(())
    }

    async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ClientError> {
        let resp = self.client.get(self.url(path)).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ClientError::api_from_body(status.as_u16(), &text));
        }
        Ok(resp.bytes().await?.to_vec())
    }

    async fn post_file(
        &self,
        path: &str,
        field: &str,
        upload: FileUpload,
    ) -> Result<Value, ClientError> {
        let part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)?;
        let form = reqwest::multipart::Form::new().part(field.to_string(), part);

        let resp = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await?;
        Self::decode(resp).await
    }
}
