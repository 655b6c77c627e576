use super::types::*;
use crate::{Error, Result, config::BackendConfig, session::Session};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub const UPLOAD_ISO_PATH: &str = "/upload-iso";
pub const ANALYZE_CASE_PATH: &str = "/analyze-case";
pub const EVALUATE_RESPONSE_PATH: &str = "/evaluate-response";

/// The three backend calls the handlers depend on. A returned `Err` means the
/// request never produced a readable JSON body; logical failures reported by
/// the server come back inside the `Ok` response.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Backend: Send + Sync {
    async fn upload_iso(&self, session: &Session, file: SelectedFile) -> Result<UploadResponse>;

    async fn analyze_case(&self, request: AnalyzeCaseRequest) -> Result<AnalyzeCaseResponse>;

    async fn evaluate_response(
        &self,
        request: EvaluateResponseRequest,
    ) -> Result<EvaluationResponse>;
}

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Error responses carry a JSON body too, so the status is only logged.
    async fn read_json<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            debug!("{} answered with status {}", path, status);
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!(
                "Failed to parse {} response ({} bytes, status {}): {}",
                path,
                body.len(),
                status,
                e
            );
            Error::decode(path, status.as_u16(), e.to_string())
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn upload_iso(&self, session: &Session, file: SelectedFile) -> Result<UploadResponse> {
        debug!(
            "Uploading {} ({} bytes) for session {}",
            file.file_name,
            file.len(),
            session
        );

        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(mime_type) = &file.mime_type {
            part = part.mime_str(mime_type)?;
        }
        let form = Form::new()
            .part("file", part)
            .text("session_id", session.id().to_string());

        let response = self
            .client
            .post(self.endpoint(UPLOAD_ISO_PATH))
            .multipart(form)
            .send()
            .await?;

        Self::read_json(UPLOAD_ISO_PATH, response).await
    }

    async fn analyze_case(&self, request: AnalyzeCaseRequest) -> Result<AnalyzeCaseResponse> {
        debug!(
            "Requesting case analysis ({} chars) for session {}",
            request.caso.chars().count(),
            request.session_id
        );

        let response = self
            .client
            .post(self.endpoint(ANALYZE_CASE_PATH))
            .json(&request)
            .send()
            .await?;

        Self::read_json(ANALYZE_CASE_PATH, response).await
    }

    async fn evaluate_response(
        &self,
        request: EvaluateResponseRequest,
    ) -> Result<EvaluationResponse> {
        debug!(
            "Requesting evaluation ({} chars) for session {}",
            request.user_response.chars().count(),
            request.session_id
        );

        let response = self
            .client
            .post(self.endpoint(EVALUATE_RESPONSE_PATH))
            .json(&request)
            .send()
            .await?;

        Self::read_json(EVALUATE_RESPONSE_PATH, response).await
    }
}
