//! Narrow contract to the presentation shell.
//!
//! The orchestrator only ever asks the shell to show one piece of content in
//! the preview overlay and to surface notifications; everything else about
//! modals, tabs, and toasts stays on the shell's side.

use crate::helpers::format_size_kb;

use super::html::HtmlDocument;
use super::viewer::PdfView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// A toast-style notification handed to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub detail: Option<String>,
}

impl Notification {
    pub fn success(title: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: title.into(),
            detail,
        }
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            title: title.into(),
            detail: None,
        }
    }

    pub fn error(title: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            detail,
        }
    }

    /// Success toast for a generated document: template name and size in KB.
    pub fn document_ready(template_name: &str, size_bytes: usize) -> Self {
        Self::success(
            "Document généré avec succès !",
            Some(format!("{} • {} KB", template_name, format_size_kb(size_bytes))),
        )
    }
}

/// What the preview overlay currently displays.
#[derive(Clone)]
pub enum PreviewContent {
    /// Busy placeholder, visible before the first network round trip.
    Loading,
    /// Paginated, zoomable PDF view.
    Pdf(PdfView),
    /// Document-like HTML approximation of the Word artifact.
    WordHtml(HtmlDocument),
    /// Rendering capability absent; generation itself succeeded.
    ViewerUnavailable { detail: String },
    /// Generation failed; the underlying reason is user-facing.
    GenerationFailed { detail: String },
}

impl std::fmt::Debug for PreviewContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreviewContent::Loading => write!(f, "Loading"),
            PreviewContent::Pdf(view) => write!(
                f,
                "Pdf(page {}/{}, scale {})",
                view.page(),
                view.page_count(),
                view.scale()
            ),
            PreviewContent::WordHtml(_) => write!(f, "WordHtml"),
            PreviewContent::ViewerUnavailable { detail } => {
                write!(f, "ViewerUnavailable({detail})")
            }
            PreviewContent::GenerationFailed { detail } => {
                write!(f, "GenerationFailed({detail})")
            }
        }
    }
}

/// Show/hide-overlay contract implemented by the presentation shell.
pub trait PreviewSurface: Send + Sync {
    fn show(&self, content: PreviewContent);
    fn notify(&self, notification: Notification);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_ready_includes_name_and_size() {
        let notification = Notification::document_ready("Attestation de travail", 2048);
        assert_eq!(notification.level, NotificationLevel::Success);
        assert_eq!(
            notification.detail.as_deref(),
            Some("Attestation de travail • 2.00 KB")
        );
    }
}
