//! Contract with the external document-generation service.
//!
//! The service produces Word and PDF artifacts from a collected payload and
//! converts Word artifacts to PDF. Artifacts travel as base64 on the wire.

mod http;

pub use http::{HttpDocumentService, ServiceConfig};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::Payload;

/// Errors reported by the document service.
///
/// `Unsupported` is a server-stated "this template cannot be rendered that
/// way" and goes straight to the next fallback stage; the transient variants
/// are retry candidates.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("operation not supported for this template: {reason}")]
    Unsupported { reason: String },
    #[error("document service returned status {status}: {message}")]
    Backend { status: u16, message: String },
    #[error("document service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("document service did not answer within {seconds}s")]
    Timeout { seconds: u64 },
    #[error("service returned data that is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl ServiceError {
    /// Whether a retry of the same operation could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ServiceError::Unsupported { .. } | ServiceError::Decode(_) => false,
            ServiceError::Backend { status, .. } => *status >= 500,
            ServiceError::Transport(_) | ServiceError::Timeout { .. } => true,
        }
    }
}

/// Wire response of both generation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub data: String,
}

/// A generated Word document, base64-encoded as received from the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordArtifact(String);

impl WordArtifact {
    pub fn from_base64(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(BASE64.encode(bytes))
    }

    pub fn as_base64(&self) -> &str {
        &self.0
    }

    pub fn decode(&self) -> Result<Vec<u8>, ServiceError> {
        Ok(BASE64.decode(&self.0)?)
    }

    /// Decoded size without allocating, from the base64 length.
    pub fn size_bytes(&self) -> usize {
        decoded_len(&self.0)
    }
}

/// A generated PDF document, base64-encoded as received from the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfArtifact(String);

impl PdfArtifact {
    pub fn from_base64(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(BASE64.encode(bytes))
    }

    pub fn as_base64(&self) -> &str {
        &self.0
    }

    pub fn decode(&self) -> Result<Vec<u8>, ServiceError> {
        Ok(BASE64.decode(&self.0)?)
    }

    pub fn size_bytes(&self) -> usize {
        decoded_len(&self.0)
    }
}

fn decoded_len(base64: &str) -> usize {
    let unpadded = base64.trim_end().trim_end_matches('=');
    unpadded.len() * 3 / 4
}

/// Operations the preview pipeline and the submission flow consume.
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Direct PDF emission. May be unsupported for a given template.
    async fn generate_pdf(&self, payload: &Payload) -> Result<PdfArtifact, ServiceError>;

    /// Word generation from the payload.
    async fn generate_word(&self, payload: &Payload) -> Result<WordArtifact, ServiceError>;

    /// Word-to-PDF conversion of a previously generated artifact.
    async fn convert_word_to_pdf(&self, word: &WordArtifact)
        -> Result<PdfArtifact, ServiceError>;
}
