//! Backend contract.
//!
//! The workflows only ever talk to the backend through [`ApiClient`], so
//! the REST transport lives in its own crate and tests can substitute an
//! in-memory double.

use crate::types::{AcceleratorStatus, Model, Person, UploadFile, VerificationResult};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (unreachable host, I/O).
    #[error("transport error: {0}")]
    Transport(String),
    /// A response arrived but its body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),
    /// Non-2xx response, with the `error` field of the body when present.
    #[error("backend rejected request (HTTP {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },
}

impl ApiError {
    /// The message the backend supplied, if this is a rejection carrying one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// Text to surface to the operator: the backend's message verbatim,
    /// otherwise the caller's generic fallback.
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.server_message().unwrap_or(fallback)
    }
}

/// The REST calls the console needs.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// `GET /api/models`
    async fn list_models(&self) -> Result<Vec<Model>, ApiError>;

    /// `POST /api/models/upload`, multipart field `model`.
    async fn upload_model(&self, file: UploadFile) -> Result<(), ApiError>;

    /// `GET /api/faces`
    async fn list_faces(&self) -> Result<Vec<Person>, ApiError>;

    /// `POST /api/faces/{person}`, multipart field `image`.
    async fn register_face(&self, person: &str, file: UploadFile) -> Result<(), ApiError>;

    /// `POST /api/verify`, multipart fields `image` and `person`.
    ///
    /// `None` is sent as an empty `person` field.
    async fn verify(
        &self,
        person: Option<&str>,
        file: UploadFile,
    ) -> Result<VerificationResult, ApiError>;

    /// `GET /api/hailo/status`
    async fn accelerator_status(&self) -> Result<AcceleratorStatus, ApiError>;

    /// `POST /api/hailo/upload`, multipart field `package` (a `.tar.gz`).
    async fn upload_runtime(&self, file: UploadFile) -> Result<(), ApiError>;
}
