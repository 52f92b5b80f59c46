use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Title count ({found}) does not match bookmark count ({expected})")]
    CountMismatch { expected: usize, found: usize },

    #[error("Invalid TOC line {line_number}: {line}")]
    MalformedLine { line_number: usize, line: String },

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SourceError::Io {
            path: path.into(),
            source,
        }
    }
}
