//! HTTP client for the comparison service.
//!
//! The service owns uploads, the version list, diff computation and reset.
//! Everything here is transport: the orchestrator only sees the
//! [`ComparisonService`] trait, which tests replace with an in-memory fake.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, multipart};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{DiffResult, Version};
use crate::infra::app_config::AppConfig;

/// Errors raised by the comparison service client.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service answered {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("unreadable service payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("cannot read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Client-side view of the comparison service.
#[async_trait]
pub trait ComparisonService: Send + Sync {
    /// Uploads one document revision. Success is a status signal only; the
    /// registry is refreshed with a separate call to [`Self::versions`].
    async fn upload(&self, path: &Path) -> Result<(), ServiceError>;

    /// Lists the uploaded versions, in service order.
    async fn versions(&self) -> Result<Vec<Version>, ServiceError>;

    /// Compares two uploaded versions by filename.
    async fn compare(&self, file1: &str, file2: &str) -> Result<DiffResult, ServiceError>;

    /// Compares two local files directly, without registering them.
    async fn compare_files(&self, path1: &Path, path2: &Path)
    -> Result<DiffResult, ServiceError>;

    /// Clears every uploaded version on the service. Idempotent.
    async fn reset(&self) -> Result<(), ServiceError>;
}

pub struct HttpComparisonService {
    base_url: String,
    http: Client,
}

impl HttpComparisonService {
    pub fn new(config: &AppConfig) -> Result<Self, ServiceError> {
        let http = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self {
            base_url: config.service_url().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn file_part(path: &Path) -> Result<multipart::Part, ServiceError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ServiceError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());
        let part = multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str(mime_for(path))?;
        Ok(part)
    }

    async fn check(response: Response) -> Result<Response, ServiceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await?;
        let message = extract_error_message(&body).unwrap_or(body);
        Err(ServiceError::Status { status, message })
    }
}

#[async_trait]
impl ComparisonService for HttpComparisonService {
    async fn upload(&self, path: &Path) -> Result<(), ServiceError> {
        let part = Self::file_part(path).await?;
        let form = multipart::Form::new().part("file", part);
        let response = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn versions(&self) -> Result<Vec<Version>, ServiceError> {
        let response = self.http.get(self.endpoint("versions")).send().await?;
        let response = Self::check(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn compare(&self, file1: &str, file2: &str) -> Result<DiffResult, ServiceError> {
        let request = CompareRequest { file1, file2 };
        let response = self
            .http
            .post(self.endpoint("compare-versions"))
            .json(&request)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn compare_files(
        &self,
        path1: &Path,
        path2: &Path,
    ) -> Result<DiffResult, ServiceError> {
        let form = multipart::Form::new()
            .part("file1", Self::file_part(path1).await?)
            .part("file2", Self::file_part(path2).await?);
        let response = self
            .http
            .post(self.endpoint("compare"))
            .multipart(form)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn reset(&self) -> Result<(), ServiceError> {
        let response = self.http.post(self.endpoint("reset")).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[derive(Serialize)]
struct CompareRequest<'a> {
    file1: &'a str,
    file2: &'a str,
}

fn mime_for(path: &Path) -> &'static str {
    if path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
    {
        "application/pdf"
    } else {
        "application/octet-stream"
    }
}

// The service reports failures as {"error": "..."}; anything else is kept
// as raw text.
fn extract_error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: String,
    }
    serde_json::from_str::<ErrorBody>(body).ok().map(|b| b.error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = AppConfig {
            service_url: Some("http://localhost:8001/".to_string()),
            request_timeout_secs: None,
        };
        let service = HttpComparisonService::new(&config).unwrap();
        assert_eq!(service.base_url(), "http://localhost:8001");
        assert_eq!(
            service.endpoint("compare-versions"),
            "http://localhost:8001/compare-versions"
        );
    }

    #[test]
    fn test_mime_follows_extension() {
        assert_eq!(mime_for(Path::new("devis.pdf")), "application/pdf");
        assert_eq!(mime_for(Path::new("devis.PDF")), "application/pdf");
        assert_eq!(mime_for(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(mime_for(Path::new("sans_extension")), "application/octet-stream");
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            extract_error_message(r#"{"error": "fichier introuvable"}"#).as_deref(),
            Some("fichier introuvable")
        );
        assert_eq!(extract_error_message("Internal Server Error"), None);
    }

    #[test]
    fn test_compare_request_shape() {
        let request = CompareRequest {
            file1: "devis_v1.pdf",
            file2: "devis_v2.pdf",
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"file1":"devis_v1.pdf","file2":"devis_v2.pdf"}"#);
    }
}
