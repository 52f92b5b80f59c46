use thiserror::Error;
use tocpress_layout::LayoutError;
use tocpress_pdf_composer::ComposerError;
use tocpress_source::SourceError;
use tocpress_traits::DocumentError;

/// Everything that can stop a table of contents from being written.
#[derive(Error, Debug)]
pub enum TocError {
    #[error("Entry source failed: {0}")]
    Source(#[from] SourceError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("PDF error: {0}")]
    Pdf(#[from] ComposerError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Entry '{title}' targets page index {page}, but the document has {page_count} pages")]
    TargetOutOfRange {
        title: String,
        page: usize,
        page_count: usize,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for TocError {
    fn from(e: serde_json::Error) -> Self {
        TocError::Config(e.to_string())
    }
}
