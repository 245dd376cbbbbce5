//! facedesk-http — REST transport for the face-recognition backend.
//!
//! Implements [`ApiClient`] over HTTP. Uploads are multipart forms; on a
//! non-2xx response the `error` string of the JSON body is passed on so
//! the console can show it verbatim.

use async_trait::async_trait;
use facedesk_core::{
    AcceleratorStatus, ApiClient, ApiError, Model, Person, UploadFile, VerificationResult,
};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// HTTP client for the backend's `/api` routes.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base: Url,
}

impl HttpClient {
    /// `base_url` is the backend root; `/api/...` is appended to its path.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".into(),
            });
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("facedesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Checked in `new`: the base URL always accepts path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: serde_json::Value = response.json().await.unwrap_or_default();
        let message = body
            .get("error")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        tracing::debug!(status = status.as_u16(), message = ?message, "request rejected");
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments);
        tracing::debug!(%url, "GET");
        let response = self.send(self.client.get(url)).await?;
        decode(response).await
    }

    async fn post_form(&self, segments: &[&str], form: Form) -> Result<Response, ApiError> {
        let url = self.endpoint(segments);
        tracing::debug!(%url, "POST multipart");
        self.send(self.client.post(url).multipart(form)).await
    }
}

fn file_part(file: UploadFile) -> Part {
    Part::bytes(file.data).file_name(file.name)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl ApiClient for HttpClient {
    async fn list_models(&self) -> Result<Vec<Model>, ApiError> {
        self.get_json(&["models"]).await
    }

    async fn upload_model(&self, file: UploadFile) -> Result<(), ApiError> {
        let form = Form::new().part("model", file_part(file));
        self.post_form(&["models", "upload"], form).await?;
        Ok(())
    }

    async fn list_faces(&self) -> Result<Vec<Person>, ApiError> {
        self.get_json(&["faces"]).await
    }

    async fn register_face(&self, person: &str, file: UploadFile) -> Result<(), ApiError> {
        let form = Form::new().part("image", file_part(file));
        self.post_form(&["faces", person], form).await?;
        Ok(())
    }

    async fn verify(
        &self,
        person: Option<&str>,
        file: UploadFile,
    ) -> Result<VerificationResult, ApiError> {
        let form = Form::new()
            .part("image", file_part(file))
            .text("person", person.unwrap_or_default().to_string());
        let response = self.post_form(&["verify"], form).await?;
        decode(response).await
    }

    async fn accelerator_status(&self) -> Result<AcceleratorStatus, ApiError> {
        self.get_json(&["hailo", "status"]).await
    }

    async fn upload_runtime(&self, file: UploadFile) -> Result<(), ApiError> {
        let form = Form::new().part("package", file_part(file));
        self.post_form(&["hailo", "upload"], form).await?;
        Ok(())
    }
}
