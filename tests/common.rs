//! Shared test doubles: scripted document service, fake render capabilities,
//! and a recording presentation surface.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use courrier_form::form::Payload;
use courrier_form::preview::{
    ConvertError, Notification, PageFrame, PdfRenderer, PreviewContent, PreviewSurface,
    ViewerError, WordHtmlConverter,
};
use courrier_form::service::{DocumentService, PdfArtifact, ServiceError, WordArtifact};

pub const PDF_BYTES: &[u8] = b"%PDF-1.4 scripted pdf";
pub const WORD_BYTES: &[u8] = b"PK scripted word document";

pub const SAMPLE_SCHEMA: &str = r#"{
    "commonVariables": {
        "entreprise": { "label": "Entreprise", "type": "text", "required": true },
        "nomDestinataire": { "label": "Nom du destinataire", "type": "text", "required": true },
        "civiliteDestinataire": { "label": "Civilité", "type": "select", "options": ["M.", "Mme"] },
        "dateDocument": { "label": "Date du document", "type": "auto" },
        "signatureExp": { "label": "Signature", "type": "text", "default": "Le secrétariat" }
    },
    "templates": {
        "attestation": {
            "displayName": "Attestation de travail",
            "specificVariables": {
                "motif": { "label": "Motif de la demande", "type": "textarea", "required": true },
                "periode": { "label": "Période", "type": "text" }
            }
        },
        "conge": { "displayName": "Demande de congé" }
    },
    "fieldOrder": {
        "coordinates": ["entreprise", "civiliteDestinataire", "nomDestinataire", "dateDocument"],
        "sender": ["signatureExp"]
    }
}"#;

/// Scripted behaviour of one service operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Succeed,
    Unsupported,
    ServerError,
}

impl Behavior {
    fn run(self, operation: &str) -> Result<(), ServiceError> {
        match self {
            Behavior::Succeed => Ok(()),
            Behavior::Unsupported => Err(ServiceError::Unsupported {
                reason: format!("{operation} not supported for this template"),
            }),
            Behavior::ServerError => Err(ServiceError::Backend {
                status: 500,
                message: format!("{operation} exploded"),
            }),
        }
    }
}

/// Document service with scripted per-operation outcomes and a call log.
pub struct MockDocumentService {
    pub pdf: Behavior,
    pub word: Behavior,
    pub convert: Behavior,
    /// Applied to the direct-PDF call, for supersession scenarios.
    pub pdf_delay: Option<Duration>,
    calls: Mutex<Vec<&'static str>>,
}

impl MockDocumentService {
    pub fn new(pdf: Behavior, word: Behavior, convert: Behavior) -> Self {
        Self {
            pdf,
            word,
            convert,
            pdf_delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_pdf_delay(mut self, delay: Duration) -> Self {
        self.pdf_delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl DocumentService for MockDocumentService {
    async fn generate_pdf(&self, _payload: &Payload) -> Result<PdfArtifact, ServiceError> {
        self.calls.lock().push("generate_pdf");
        if let Some(delay) = self.pdf_delay {
            tokio::time::sleep(delay).await;
        }
        self.pdf.run("generate_pdf")?;
        Ok(PdfArtifact::from_bytes(PDF_BYTES))
    }

    async fn generate_word(&self, _payload: &Payload) -> Result<WordArtifact, ServiceError> {
        self.calls.lock().push("generate_word");
        self.word.run("generate_word")?;
        Ok(WordArtifact::from_bytes(WORD_BYTES))
    }

    async fn convert_word_to_pdf(
        &self,
        _word: &WordArtifact,
    ) -> Result<PdfArtifact, ServiceError> {
        self.calls.lock().push("convert_word_to_pdf");
        self.convert.run("convert_word_to_pdf")?;
        Ok(PdfArtifact::from_bytes(PDF_BYTES))
    }
}

/// Renderer reporting a fixed page count and deterministic frames.
pub struct FakePdfRenderer {
    pub pages: u32,
}

impl FakePdfRenderer {
    pub fn with_pages(pages: u32) -> Arc<Self> {
        Arc::new(Self { pages })
    }
}

impl PdfRenderer for FakePdfRenderer {
    fn page_count(&self, _document: &[u8]) -> Result<u32, ViewerError> {
        Ok(self.pages)
    }

    fn render_page(
        &self,
        _document: &[u8],
        page: u32,
        scale: f32,
    ) -> Result<PageFrame, ViewerError> {
        Ok(PageFrame {
            page,
            scale,
            width: (612.0 * scale) as u32,
            height: (792.0 * scale) as u32,
            pixels: Vec::new(),
        })
    }
}

/// Converter producing a trivially checkable body.
pub struct FakeHtmlConverter;

impl WordHtmlConverter for FakeHtmlConverter {
    fn convert(
        &self,
        document: &[u8],
        _style_map: &[(&str, &str)],
    ) -> Result<String, ConvertError> {
        Ok(format!("<p>converted {} bytes</p>", document.len()))
    }
}

/// Converter that always fails.
pub struct BrokenHtmlConverter;

impl WordHtmlConverter for BrokenHtmlConverter {
    fn convert(
        &self,
        _document: &[u8],
        _style_map: &[(&str, &str)],
    ) -> Result<String, ConvertError> {
        Err(ConvertError("scripted converter failure".to_string()))
    }
}

/// Surface recording everything the orchestrator shows and notifies.
#[derive(Default)]
pub struct RecordingSurface {
    pub shown: Mutex<Vec<PreviewContent>>,
    pub notifications: Mutex<Vec<Notification>>,
}

impl RecordingSurface {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn shown_count(&self) -> usize {
        self.shown.lock().len()
    }

    pub fn last_shown(&self) -> Option<PreviewContent> {
        self.shown.lock().last().cloned()
    }

    pub fn first_shown_is_loading(&self) -> bool {
        matches!(self.shown.lock().first(), Some(PreviewContent::Loading))
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }
}

impl PreviewSurface for RecordingSurface {
    fn show(&self, content: PreviewContent) {
        self.shown.lock().push(content);
    }

    fn notify(&self, notification: Notification) {
        self.notifications.lock().push(notification);
    }
}
