use super::schema::{
    AskRequest, AskResponse, FilesResponse, HealthResponse, ResetResponse, StatusResponse,
    UploadAck,
};
use crate::error::{Error, Result};
use reqwest::multipart;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Typed client for the document Q&A backend. Cheap to clone; every
/// operation is a one-shot request with no retry.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = base_url.trim_end_matches('/').to_string();
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(Error::InvalidBackendUrl(base));
        }
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// URL of the live file-update stream, derived from the base origin.
    pub fn ws_files_url(&self) -> String {
        let origin = if let Some(rest) = self.base.strip_prefix("https://") {
            format!("wss://{rest}")
        } else {
            format!("ws://{}", self.base.trim_start_matches("http://"))
        };
        format!("{origin}/ws/files")
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Non-2xx is `Error::Status`; a 2xx body that fails to decode is a
    /// distinct `Error::MalformedResponse` so contract drift is visible.
    async fn decode<T: DeserializeOwned>(
        resp: reqwest::Response,
        endpoint: &'static str,
    ) -> Result<T> {
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|source| Error::MalformedResponse { endpoint, source })
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let resp = self.http.get(self.url("/health")).send().await?;
        Self::decode(resp, "/health").await
    }

    pub async fn status(&self) -> Result<StatusResponse> {
        let resp = self.http.get(self.url("/status")).send().await?;
        Self::decode(resp, "/status").await
    }

    pub async fn list_files(&self) -> Result<FilesResponse> {
        let resp = self.http.get(self.url("/files")).send().await?;
        Self::decode(resp, "/files").await
    }

    /// Empty or whitespace-only questions are rejected before any
    /// request is issued.
    pub async fn ask(&self, question: &str, k: u8) -> Result<AskResponse> {
        if question.trim().is_empty() {
            return Err(Error::EmptyQuestion);
        }
        info!(k, "asking backend");
        let resp = self
            .http
            .post(self.url("/ask"))
            .json(&AskRequest {
                question: question.to_string(),
                k,
            })
            .send()
            .await?;
        Self::decode(resp, "/ask").await
    }

    /// Upload exactly one file as a multipart form, field name `file`.
    pub async fn upload(&self, path: &Path) -> Result<UploadAck> {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.bin")
            .to_string();
        info!(file = %filename, size = bytes.len(), "uploading document");
        let part = multipart::Part::bytes(bytes).file_name(filename);
        let form = multipart::Form::new().part("file", part);
        let resp = self.http.post(self.url("/upload")).multipart(form).send().await?;
        Self::decode(resp, "/upload").await
    }

    /// Destructive backend reset. The confirmation gate lives in the
    /// command layer; this issues the POST unconditionally.
    pub async fn fresh_start(&self) -> Result<ResetResponse> {
        debug!("issuing fresh-start");
        let resp = self.http.post(self.url("/fresh-start")).send().await?;
        Self::decode(resp, "/fresh-start").await
    }
}
