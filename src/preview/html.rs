//! Word-to-HTML fallback rendering.
//!
//! When no PDF can be displayed, the Word artifact is converted to HTML and
//! wrapped in a fixed-size A4 page container with the letterhead header and
//! footer imagery, as a document-like approximation.

use thiserror::Error;

/// Style-run and paragraph-style mappings handed to the converter.
pub const STYLE_MAP: &[(&str, &str)] = &[
    ("p[style-name='Heading 1']", "h1:fresh"),
    ("p[style-name='Heading 2']", "h2:fresh"),
    ("p[style-name='Heading 3']", "h3:fresh"),
    ("p[style-name='Title']", "h1.title:fresh"),
    ("r[style-name='Strong']", "strong"),
    ("r[style-name='Emphasis']", "em"),
];

pub const HEADER_IMAGE: &str = "./assets/img/logo_entete.png";
pub const FOOTER_IMAGE: &str = "./assets/img/logo_piedpage.png";

#[derive(Debug, Error)]
#[error("Word to HTML conversion failed: {0}")]
pub struct ConvertError(pub String);

/// HTML-conversion capability for Word bytes; optional, may be absent.
pub trait WordHtmlConverter: Send + Sync {
    fn convert(&self, document: &[u8], style_map: &[(&str, &str)]) -> Result<String, ConvertError>;
}

/// A converted document together with its page-like wrapper markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    /// Converted body markup, unwrapped.
    pub body: String,
    /// Full A4 page container with letterhead header and footer.
    pub page: String,
}

impl HtmlDocument {
    /// Wrap converted body HTML in the fixed-size A4 page shell.
    pub fn paged(body: impl Into<String>) -> Self {
        let body = body.into();
        let page = format!(
            r#"<div class="word-document-preview" style="width: 21cm; min-height: 29.7cm; box-sizing: border-box; font-family: 'Calibri', 'Arial', sans-serif; font-size: 11pt; line-height: 1.5; display: flex; flex-direction: column;">
  <div style="padding: 1.27cm 2.54cm 0.5cm 2.54cm;">
    <img src="{HEADER_IMAGE}" alt="En-tête" style="width: 25%; display: block;">
  </div>
  <div style="flex: 1; padding: 0 2.54cm;">
{body}
  </div>
  <div style="padding: 0.5cm 2.54cm 1.27cm 2.54cm; margin-top: auto;">
    <img src="{FOOTER_IMAGE}" alt="Pied de page" style="width: 100%; display: block;">
  </div>
</div>"#
        );
        Self { body, page }
    }
}
