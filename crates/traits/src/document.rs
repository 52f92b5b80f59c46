//! The document seam the table-of-contents pipeline draws onto.
//!
//! This trait allows the pipeline to insert pages, draw text, attach links and
//! rewrite the outline without being tied to a particular PDF library.

use crate::measure::TextMeasure;
use thiserror::Error;
use tocpress_types::{OutlineItem, Point, Rect, TextStyle};

/// Error type for document operations.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Page index {index} is out of range for a document with {page_count} pages")]
    PageOutOfRange { index: usize, page_count: usize },

    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),

    #[error("Document backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A mutable document that can receive table-of-contents pages.
///
/// Page indices are 0-based and always refer to the document as it is at the
/// time of the call, so after inserting pages at the front every original page
/// has moved back by the number of inserted pages.
///
/// # Implementations
///
/// - `tocpress_pdf_composer::PdfDocument`: a `lopdf`-backed PDF document
pub trait TocDocument: TextMeasure {
    /// Handle to a page created by `insert_blank_page`.
    type Page: Copy + std::fmt::Debug;

    /// Number of pages currently in the document.
    fn page_count(&self) -> usize;

    /// Reads the existing outline (bookmarks) in document order, flattened with levels.
    fn existing_outline(&self) -> Result<Vec<OutlineItem>, DocumentError>;

    /// Inserts a blank page so that it ends up at index `at`.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::PageOutOfRange` if `at > page_count()`.
    fn insert_blank_page(&mut self, at: usize) -> Result<Self::Page, DocumentError>;

    /// Draws a single line of text with its baseline at `origin`.
    fn draw_text(
        &mut self,
        page: Self::Page,
        origin: Point,
        text: &str,
        style: &TextStyle,
    ) -> Result<(), DocumentError>;

    /// Adds a clickable region on `page` that jumps to the page at index `target_page`.
    fn add_navigation_link(
        &mut self,
        page: Self::Page,
        rect: Rect,
        target_page: usize,
    ) -> Result<(), DocumentError>;

    /// Replaces the document outline. Item pages are indices into the current document.
    fn set_outline(&mut self, items: &[OutlineItem]) -> Result<(), DocumentError>;
}
