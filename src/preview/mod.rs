//! Preview orchestration: fallback-chained generation and rendering.
//!
//! One invocation walks the chain direct-PDF → Word → Word-to-PDF, then
//! renders whichever artifact it holds: a paginated PDF view when a renderer
//! is available, a document-like HTML approximation otherwise. Every stage
//! degrades independently; only a failed Word generation is terminal.

pub mod html;
pub mod summary;
pub mod surface;
pub mod viewer;

pub use html::{ConvertError, HtmlDocument, WordHtmlConverter, STYLE_MAP};
pub use summary::render_summary;
pub use surface::{Notification, NotificationLevel, PreviewContent, PreviewSurface};
pub use viewer::{PageFrame, PdfRenderer, PdfView, ViewerError};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::form::Payload;
use crate::schema::FormSchema;
use crate::service::{DocumentService, PdfArtifact, WordArtifact};
use crate::session::SessionContext;

/// Optional front-end rendering capabilities.
#[derive(Clone, Default)]
pub struct PreviewCapabilities {
    pub pdf_renderer: Option<Arc<dyn PdfRenderer>>,
    pub html_converter: Option<Arc<dyn WordHtmlConverter>>,
}

/// Terminal state of one preview invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// Guard tripped: nothing selected, no network call issued.
    NoTemplateSelected,
    /// A PDF artifact is displayed in the paginated viewer.
    PdfRendered { pages: u32, size_bytes: usize },
    /// The Word artifact is displayed as an HTML approximation.
    WordHtmlRendered { size_bytes: usize },
    /// Generation succeeded but no rendering capability is present.
    ViewerUnavailable,
    /// The chain ended without a displayable artifact.
    GenerationFailed { reason: String },
    /// A newer invocation took over; this one rendered nothing.
    Superseded,
}

/// Drives the preview fallback chain against the document service.
pub struct PreviewOrchestrator {
    service: Arc<dyn DocumentService>,
    surface: Arc<dyn PreviewSurface>,
    session: Arc<SessionContext>,
    schema: Arc<FormSchema>,
    capabilities: PreviewCapabilities,
    generation: AtomicU64,
}

impl PreviewOrchestrator {
    pub fn new(
        service: Arc<dyn DocumentService>,
        surface: Arc<dyn PreviewSurface>,
        session: Arc<SessionContext>,
        schema: Arc<FormSchema>,
        capabilities: PreviewCapabilities,
    ) -> Self {
        Self {
            service,
            surface,
            session,
            schema,
            capabilities,
            generation: AtomicU64::new(0),
        }
    }

    /// Run one preview invocation for the collected payload.
    ///
    /// Success and failure are communicated through the surface; the returned
    /// outcome mirrors the terminal state for the caller and for tests. A
    /// later invocation supersedes this one: stale results never reach the
    /// surface.
    pub async fn preview(&self, payload: Payload) -> PreviewOutcome {
        if payload.template_type.trim().is_empty() {
            self.surface
                .notify(Notification::warning("Veuillez sélectionner un type de document"));
            return PreviewOutcome::NoTemplateSelected;
        }

        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let template_name = self.schema.display_name(&payload.template_type);

        // Busy placeholder goes up before the first network round trip.
        self.show(ticket, PreviewContent::Loading);

        let mut word: Option<WordArtifact> = None;
        let mut pdf: Option<PdfArtifact> = None;
        match self.service.generate_pdf(&payload).await {
            Ok(artifact) => {
                log::info!("direct PDF generation succeeded");
                pdf = Some(artifact);
            }
            Err(err) => {
                // Expected branch: the service does not emit PDF for every
                // template. Fall through to Word generation.
                log::info!("direct PDF generation unavailable, falling back to Word: {err}");
            }
        }

        if pdf.is_none() {
            match self.service.generate_word(&payload).await {
                Ok(artifact) => {
                    // Retained for download whatever happens to the
                    // conversion below.
                    self.session.store_generated_word(artifact.clone());
                    word = Some(artifact);
                }
                Err(err) => {
                    log::error!("Word generation failed: {err}");
                    return self.fail(ticket, format!("Erreur lors de la génération: {err}"));
                }
            }

            if let Some(artifact) = &word {
                match self.service.convert_word_to_pdf(artifact).await {
                    Ok(converted) => {
                        log::info!("Word converted to PDF");
                        pdf = Some(converted);
                    }
                    Err(err) => {
                        log::warn!("Word to PDF conversion failed, trying HTML fallback: {err}");
                    }
                }
            }
        }

        self.render(ticket, &template_name, pdf, word)
    }

    /// Resolve the render path for whatever artifacts the chain produced.
    fn render(
        &self,
        ticket: u64,
        template_name: &str,
        pdf: Option<PdfArtifact>,
        word: Option<WordArtifact>,
    ) -> PreviewOutcome {
        if let (Some(pdf), Some(renderer)) = (&pdf, &self.capabilities.pdf_renderer) {
            return match self.render_pdf(ticket, template_name, pdf, renderer.clone()) {
                Ok(outcome) => outcome,
                Err(reason) => self.fail(ticket, reason),
            };
        }

        if pdf.is_none() {
            if let (Some(word), Some(converter)) = (&word, &self.capabilities.html_converter) {
                return match self.render_word_html(ticket, template_name, word, converter.as_ref())
                {
                    Ok(outcome) => outcome,
                    Err(reason) => self.fail(ticket, reason),
                };
            }
        }

        if self.capabilities.pdf_renderer.is_none() {
            // Generation worked; only the viewer is missing. Reported
            // distinctly so users are not told generation failed.
            log::warn!("no PDF renderer available, preview cannot be displayed");
            if !self.show(
                ticket,
                PreviewContent::ViewerUnavailable {
                    detail: "La visionneuse PDF n'est pas disponible".to_string(),
                },
            ) {
                return PreviewOutcome::Superseded;
            }
            return PreviewOutcome::ViewerUnavailable;
        }

        self.fail(
            ticket,
            "Aucun document affichable n'a pu être produit".to_string(),
        )
    }

    fn render_pdf(
        &self,
        ticket: u64,
        template_name: &str,
        pdf: &PdfArtifact,
        renderer: Arc<dyn PdfRenderer>,
    ) -> Result<PreviewOutcome, String> {
        let bytes = pdf
            .decode()
            .map_err(|err| format!("Erreur lors de l'affichage du PDF: {err}"))?;
        let size_bytes = bytes.len();

        let view = PdfView::open(renderer, bytes)
            .map_err(|err| format!("Erreur lors de l'affichage du PDF: {err}"))?;
        let pages = view.page_count();

        if !self.show(ticket, PreviewContent::Pdf(view)) {
            return Ok(PreviewOutcome::Superseded);
        }
        self.notify(ticket, Notification::document_ready(template_name, size_bytes));
        Ok(PreviewOutcome::PdfRendered { pages, size_bytes })
    }

    fn render_word_html(
        &self,
        ticket: u64,
        template_name: &str,
        word: &WordArtifact,
        converter: &dyn WordHtmlConverter,
    ) -> Result<PreviewOutcome, String> {
        let bytes = word
            .decode()
            .map_err(|err| format!("Prévisualisation non disponible: {err}"))?;
        let size_bytes = bytes.len();

        let body = converter
            .convert(&bytes, STYLE_MAP)
            .map_err(|err| format!("Prévisualisation non disponible: {err}"))?;
        let document = HtmlDocument::paged(body);

        if !self.show(ticket, PreviewContent::WordHtml(document)) {
            return Ok(PreviewOutcome::Superseded);
        }
        self.notify(ticket, Notification::document_ready(template_name, size_bytes));
        Ok(PreviewOutcome::WordHtmlRendered { size_bytes })
    }

    fn fail(&self, ticket: u64, reason: String) -> PreviewOutcome {
        if !self.show(
            ticket,
            PreviewContent::GenerationFailed {
                detail: reason.clone(),
            },
        ) {
            return PreviewOutcome::Superseded;
        }
        self.notify(
            ticket,
            Notification::error("Erreur lors de la génération", Some(reason.clone())),
        );
        PreviewOutcome::GenerationFailed { reason }
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    /// Surface update gated on the generation ticket: the latest invocation's
    /// render always wins, a slower stale one is discarded.
    fn show(&self, ticket: u64, content: PreviewContent) -> bool {
        if !self.is_current(ticket) {
            log::debug!("stale preview result discarded (ticket {ticket})");
            return false;
        }
        self.surface.show(content);
        true
    }

    fn notify(&self, ticket: u64, notification: Notification) {
        if self.is_current(ticket) {
            self.surface.notify(notification);
        }
    }
}
