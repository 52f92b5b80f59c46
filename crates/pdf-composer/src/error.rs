use thiserror::Error;
use tocpress_traits::DocumentError;

#[derive(Error, Debug)]
pub enum ComposerError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Page index {index} is out of range for a document with {page_count} pages")]
    PageOutOfRange { index: usize, page_count: usize },

    #[error("{0}")]
    Structure(String),
}

impl From<ComposerError> for DocumentError {
    fn from(err: ComposerError) -> Self {
        match err {
            ComposerError::Io(e) => DocumentError::Io(e),
            ComposerError::PageOutOfRange { index, page_count } => {
                DocumentError::PageOutOfRange { index, page_count }
            }
            ComposerError::Structure(msg) => DocumentError::InvalidStructure(msg),
            ComposerError::Pdf(e) => DocumentError::Backend(Box::new(e)),
        }
    }
}
