//! Where table-of-contents entries come from.
//!
//! ## Available Sources
//!
//! - `EntrySource::Outline`: the document's own bookmarks, used verbatim
//! - `EntrySource::OutlineWithTitles`: the bookmarks' levels and pages with titles from a list
//! - `EntrySource::TextSpec`: a `[level] title | PAGE n` file for documents without bookmarks
//!
//! ## Example
//!
//! ```ignore
//! use tocpress_source::EntrySource;
//!
//! let source = EntrySource::detect("toc.txt")?;
//! let entries = source.resolve(&doc.existing_outline()?)?;
//! ```

mod error;
pub mod text_spec;
pub mod titles;

pub use error::SourceError;
pub use text_spec::{is_spec_line, parse_text_spec};
pub use titles::parse_titles;

use log::{debug, info};
use std::path::Path;
use tocpress_types::{Entry, OutlineItem};

/// The strategy used to build the ordered entry list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySource {
    /// Use the existing outline as-is.
    Outline,
    /// Use the existing outline's levels and pages, replacing titles positionally.
    OutlineWithTitles(Vec<String>),
    /// Parse entries from the contents of a TOC spec file; the outline is not consulted.
    TextSpec(String),
}

fn read_side_file(path: &Path) -> Result<String, SourceError> {
    std::fs::read_to_string(path).map_err(|e| SourceError::io(path, e))
}

impl EntrySource {
    /// Reads a title-override list from `path`.
    pub fn titles_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let titles = parse_titles(&read_side_file(path.as_ref())?);
        debug!("Read {} override titles from {}", titles.len(), path.as_ref().display());
        Ok(EntrySource::OutlineWithTitles(titles))
    }

    /// Reads a TOC spec file from `path`. Parsing happens in [`EntrySource::resolve`].
    pub fn spec_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        Ok(EntrySource::TextSpec(read_side_file(path.as_ref())?))
    }

    /// Reads `path` and decides what kind of side file it is.
    ///
    /// A file whose first non-blank line is a valid spec line is a TOC spec;
    /// anything else is a list of override titles.
    pub fn detect(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let text = read_side_file(path)?;
        let first = text
            .strip_prefix('\u{feff}')
            .unwrap_or(&text)
            .lines()
            .find(|line| !line.trim().is_empty());

        if first.is_some_and(is_spec_line) {
            info!("Treating {} as a TOC spec file", path.display());
            Ok(EntrySource::TextSpec(text))
        } else {
            info!("Treating {} as a title override list", path.display());
            Ok(EntrySource::OutlineWithTitles(parse_titles(&text)))
        }
    }

    /// Whether `resolve` needs the document's existing outline.
    pub fn needs_outline(&self) -> bool {
        !matches!(self, EntrySource::TextSpec(_))
    }

    /// Builds the ordered entry list. `outline` is ignored for `TextSpec`.
    pub fn resolve(&self, outline: &[OutlineItem]) -> Result<Vec<Entry>, SourceError> {
        match self {
            EntrySource::Outline => Ok(outline.iter().cloned().map(Entry::from).collect()),
            EntrySource::OutlineWithTitles(titles) => {
                if titles.len() != outline.len() {
                    return Err(SourceError::CountMismatch {
                        expected: outline.len(),
                        found: titles.len(),
                    });
                }
                Ok(outline
                    .iter()
                    .zip(titles)
                    .map(|(item, title)| Entry::new(item.level, title.as_str(), item.page))
                    .collect())
            }
            EntrySource::TextSpec(text) => parse_text_spec(text),
        }
    }
}
