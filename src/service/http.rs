//! reqwest-backed client for the document service.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{DocumentService, GeneratedFile, PdfArtifact, ServiceError, WordArtifact};
use crate::form::Payload;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Endpoint and timeout configuration for the document service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read `DOCUMENT_SERVICE_URL` and `DOCUMENT_SERVICE_TIMEOUT_SECS` from the
    /// environment (and `.env`), with local defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let base_url =
            env::var("DOCUMENT_SERVICE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout_secs = env::var("DOCUMENT_SERVICE_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// HTTP implementation of the document-service contract.
pub struct HttpDocumentService {
    client: reqwest::Client,
    config: ServiceConfig,
}

/// Error body the service sends with non-2xx answers.
#[derive(Debug, Default, Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    unsupported: bool,
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConvertRequest<'a> {
    word_base64: &'a str,
}

impl HttpDocumentService {
    pub fn new(config: ServiceConfig) -> Self {
        let client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(900))
            .user_agent(concat!("courrier-form/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create reqwest client");
        Self { client, config }
    }

    pub fn from_env() -> Self {
        Self::new(ServiceConfig::from_env())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// POST a JSON body; the configured timeout bounds the whole exchange,
    /// body included. The document payload dominates the transfer, so a
    /// send-only bound would let a stalled body read hang forever.
    async fn post_json<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<GeneratedFile, ServiceError> {
        let seconds = self.config.timeout.as_secs();
        let call = async {
            let response = self.client.post(self.endpoint(path)).json(body).send().await?;

            let status = response.status();
            if !status.is_success() {
                let body: ServiceErrorBody = response.json().await.unwrap_or_default();
                return if body.unsupported {
                    Err(ServiceError::Unsupported {
                        reason: body.message,
                    })
                } else {
                    Err(ServiceError::Backend {
                        status: status.as_u16(),
                        message: body.message,
                    })
                };
            }

            Ok(response.json::<GeneratedFile>().await?)
        };

        tokio::time::timeout(self.config.timeout, call)
            .await
            .map_err(|_| ServiceError::Timeout { seconds })?
    }
}

#[async_trait]
impl DocumentService for HttpDocumentService {
    async fn generate_pdf(&self, payload: &Payload) -> Result<PdfArtifact, ServiceError> {
        log::debug!("requesting direct PDF generation for '{}'", payload.template_type);
        let file = self.post_json("/api/documents/pdf", payload).await?;
        Ok(PdfArtifact::from_base64(file.data))
    }

    async fn generate_word(&self, payload: &Payload) -> Result<WordArtifact, ServiceError> {
        log::debug!("requesting Word generation for '{}'", payload.template_type);
        let file = self.post_json("/api/documents/word", payload).await?;
        Ok(WordArtifact::from_base64(file.data))
    }

    async fn convert_word_to_pdf(
        &self,
        word: &WordArtifact,
    ) -> Result<PdfArtifact, ServiceError> {
        log::debug!("requesting Word to PDF conversion");
        let request = ConvertRequest {
            word_base64: word.as_base64(),
        };
        let file = self.post_json("/api/documents/convert", &request).await?;
        Ok(PdfArtifact::from_base64(file.data))
    }
}
