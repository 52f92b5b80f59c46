use crate::error::TocError;
use std::path::{Path, PathBuf};
use tocpress_layout::LayoutConfig;
use tocpress_source::EntrySource;

/// Where the entries of a job come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceSpec {
    /// The input document's own outline.
    #[default]
    Outline,
    /// The outline, with titles replaced from a one-title-per-line file.
    TitlesFile(PathBuf),
    /// A `[level] title | PAGE n` file; the outline is left alone.
    SpecFile(PathBuf),
    /// A side file whose kind is decided from its first non-blank line.
    SideFile(PathBuf),
}

impl SourceSpec {
    pub(crate) fn open(&self) -> Result<EntrySource, TocError> {
        Ok(match self {
            SourceSpec::Outline => EntrySource::Outline,
            SourceSpec::TitlesFile(path) => EntrySource::titles_file(path)?,
            SourceSpec::SpecFile(path) => EntrySource::spec_file(path)?,
            SourceSpec::SideFile(path) => EntrySource::detect(path)?,
        })
    }
}

/// One document to process: read `input_path`, write the result to `output_path`.
#[derive(Debug, Clone)]
pub struct TocJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub source: SourceSpec,
    pub layout: LayoutConfig,
}

impl TocJob {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            source: SourceSpec::default(),
            layout: LayoutConfig::default(),
        }
    }

    pub fn with_source(mut self, source: SourceSpec) -> Self {
        self.source = source;
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }
}

/// Loads a layout configuration from a JSON file. Missing fields keep their defaults.
pub fn load_layout_config(path: impl AsRef<Path>) -> Result<LayoutConfig, TocError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| TocError::Config(format!("cannot read '{}': {}", path.display(), e)))?;
    parse_layout_config(&text)
}

pub fn parse_layout_config(json: &str) -> Result<LayoutConfig, TocError> {
    let config: LayoutConfig = serde_json::from_str(json)?;
    config
        .validate()
        .map_err(|e| TocError::Config(e.to_string()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tocpress_layout::OverflowPolicy;

    #[test]
    fn parses_partial_config() {
        let config = parse_layout_config(r##"{"maxY": 700, "entryColor": "#336699"}"##).unwrap();
        assert_eq!(config.max_y, 700.0);
        assert_eq!(config.entry_color.r, 0x33);
        assert_eq!(config.overflow, OverflowPolicy::Continue);
    }

    #[test]
    fn rejects_bad_json_and_bad_values() {
        assert!(matches!(
            parse_layout_config("{ not json"),
            Err(TocError::Config(_))
        ));
        assert!(matches!(
            parse_layout_config(r#"{"fontSize": 0}"#),
            Err(TocError::Config(_))
        ));
        assert!(matches!(
            parse_layout_config(r##"{"entryColor": "#é1"}"##),
            Err(TocError::Config(_))
        ));
    }

    #[test]
    fn builder_sets_fields() {
        let job = TocJob::new("in.pdf", "out.pdf").with_source(SourceSpec::SpecFile("toc.txt".into()));
        assert_eq!(job.source, SourceSpec::SpecFile(PathBuf::from("toc.txt")));
        assert_eq!(job.layout, LayoutConfig::default());
    }
}
