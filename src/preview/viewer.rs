//! Paginated, zoomable PDF view model.
//!
//! The actual rasterisation lives behind `PdfRenderer`: an optional front-end
//! capability that may fail to load. The view model owns pagination and zoom
//! bounds and guarantees that page/scale changes become observable only with
//! their freshly rendered frame.

use std::sync::Arc;

use thiserror::Error;

pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.25;
pub const INITIAL_SCALE: f32 = 1.5;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to open PDF document: {0}")]
    Open(String),
    #[error("failed to render page {page}: {reason}")]
    Render { page: u32, reason: String },
}

/// A rasterised page at a given scale.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFrame {
    pub page: u32,
    pub scale: f32,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Rasterisation capability for PDF bytes.
pub trait PdfRenderer: Send + Sync {
    fn page_count(&self, document: &[u8]) -> Result<u32, ViewerError>;
    fn render_page(&self, document: &[u8], page: u32, scale: f32) -> Result<PageFrame, ViewerError>;
}

/// Live viewer state: current page, current scale, current frame.
#[derive(Clone)]
pub struct PdfView {
    renderer: Arc<dyn PdfRenderer>,
    document: Arc<[u8]>,
    page_count: u32,
    page: u32,
    scale: f32,
    frame: PageFrame,
}

impl PdfView {
    /// Decode the document once, count pages, render page 1 at the initial
    /// scale.
    pub fn open(renderer: Arc<dyn PdfRenderer>, document: Vec<u8>) -> Result<Self, ViewerError> {
        let page_count = renderer.page_count(&document)?;
        if page_count == 0 {
            return Err(ViewerError::Open("document has no pages".to_string()));
        }
        let frame = renderer.render_page(&document, 1, INITIAL_SCALE)?;
        Ok(Self {
            renderer,
            document: document.into(),
            page_count,
            page: 1,
            scale: INITIAL_SCALE,
            frame,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    pub fn frame(&self) -> &PageFrame {
        &self.frame
    }

    /// Previous is enabled exactly when not on page 1.
    pub fn can_go_prev(&self) -> bool {
        self.page > 1
    }

    /// Next is enabled exactly when not on the last page.
    pub fn can_go_next(&self) -> bool {
        self.page < self.page_count
    }

    /// Move to the next page; returns false (and renders nothing) at the end.
    pub fn next_page(&mut self) -> Result<bool, ViewerError> {
        if !self.can_go_next() {
            return Ok(false);
        }
        self.apply(self.page + 1, self.scale)?;
        Ok(true)
    }

    pub fn prev_page(&mut self) -> Result<bool, ViewerError> {
        if !self.can_go_prev() {
            return Ok(false);
        }
        self.apply(self.page - 1, self.scale)?;
        Ok(true)
    }

    /// Increase scale one step, clamped to the maximum; returns the new scale.
    pub fn zoom_in(&mut self) -> Result<f32, ViewerError> {
        let scale = (self.scale + ZOOM_STEP).min(MAX_SCALE);
        self.apply(self.page, scale)?;
        Ok(self.scale)
    }

    pub fn zoom_out(&mut self) -> Result<f32, ViewerError> {
        let scale = (self.scale - ZOOM_STEP).max(MIN_SCALE);
        self.apply(self.page, scale)?;
        Ok(self.scale)
    }

    /// Render first, commit after: a failed render leaves the previous frame,
    /// page, and scale intact, so no stale combination is ever observable.
    fn apply(&mut self, page: u32, scale: f32) -> Result<(), ViewerError> {
        let frame = self.renderer.render_page(&self.document, page, scale)?;
        self.page = page;
        self.scale = scale;
        self.frame = frame;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Deterministic renderer: frame size scales linearly, optional failures.
    struct FakeRenderer {
        pages: u32,
        fail_pages: Mutex<Vec<u32>>,
    }

    impl FakeRenderer {
        fn with_pages(pages: u32) -> Arc<Self> {
            Arc::new(Self {
                pages,
                fail_pages: Mutex::new(Vec::new()),
            })
        }
    }

    impl PdfRenderer for FakeRenderer {
        fn page_count(&self, _document: &[u8]) -> Result<u32, ViewerError> {
            Ok(self.pages)
        }

        fn render_page(
            &self,
            _document: &[u8],
            page: u32,
            scale: f32,
        ) -> Result<PageFrame, ViewerError> {
            if self.fail_pages.lock().contains(&page) {
                return Err(ViewerError::Render {
                    page,
                    reason: "scripted failure".to_string(),
                });
            }
            Ok(PageFrame {
                page,
                scale,
                width: (612.0 * scale) as u32,
                height: (792.0 * scale) as u32,
                pixels: Vec::new(),
            })
        }
    }

    fn view(pages: u32) -> PdfView {
        PdfView::open(FakeRenderer::with_pages(pages), b"%PDF".to_vec()).unwrap()
    }

    #[test]
    fn test_opens_on_page_one_at_initial_scale() {
        let view = view(3);
        assert_eq!(view.page(), 1);
        assert_eq!(view.page_count(), 3);
        assert_eq!(view.scale(), INITIAL_SCALE);
        assert_eq!(view.zoom_percent(), 150);
        assert_eq!(view.frame().page, 1);
    }

    #[test]
    fn test_empty_document_fails_to_open() {
        let result = PdfView::open(FakeRenderer::with_pages(0), Vec::new());
        assert!(matches!(result, Err(ViewerError::Open(_))));
    }

    #[test]
    fn test_pagination_bounds() {
        let mut view = view(2);
        assert!(!view.can_go_prev());
        assert!(view.can_go_next());

        assert!(view.next_page().unwrap());
        assert_eq!(view.page(), 2);
        assert!(view.can_go_prev());
        assert!(!view.can_go_next());

        // Past the last page: no-op.
        assert!(!view.next_page().unwrap());
        assert_eq!(view.page(), 2);

        assert!(view.prev_page().unwrap());
        assert!(!view.prev_page().unwrap());
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_zoom_clamps_to_bounds() {
        let mut view = view(1);
        for _ in 0..10 {
            view.zoom_in().unwrap();
        }
        assert_eq!(view.scale(), MAX_SCALE);

        for _ in 0..20 {
            view.zoom_out().unwrap();
        }
        assert_eq!(view.scale(), MIN_SCALE);
        assert_eq!(view.zoom_percent(), 50);
    }

    #[test]
    fn test_frame_tracks_page_and_scale() {
        let mut view = view(3);
        view.next_page().unwrap();
        view.zoom_in().unwrap();
        let frame = view.frame();
        assert_eq!(frame.page, 2);
        assert_eq!(frame.scale, INITIAL_SCALE + ZOOM_STEP);
        assert_eq!(frame.width, (612.0 * (INITIAL_SCALE + ZOOM_STEP)) as u32);
    }

    #[test]
    fn test_failed_render_keeps_previous_frame() {
        let renderer = FakeRenderer::with_pages(3);
        let mut view = PdfView::open(renderer.clone(), b"%PDF".to_vec()).unwrap();
        renderer.fail_pages.lock().push(2);

        assert!(view.next_page().is_err());
        // State did not move: page 1 frame still shown.
        assert_eq!(view.page(), 1);
        assert_eq!(view.frame().page, 1);
        assert!(!view.can_go_prev());
    }
}
