//! The line-oriented TOC format for documents without bookmarks.
//!
//! Each non-blank line reads `[<level>] <title> | PAGE <n>`, where `n` is the
//! 0-based index of the target page in the unmodified document:
//!
//! ```text
//! [1] Introduction | PAGE 0
//! [2] Methods | page 4
//! ```

use crate::error::SourceError;
use regex::Regex;
use std::sync::LazyLock;
use tocpress_types::Entry;

static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\[(\d+)\]\s*(.*?)\s*\|\s*PAGE\s*(\d+)")
        .expect("BUG: invalid TOC line regex literal")
});

/// Whether `line` looks like a TOC spec line. Used to tell spec files from title lists.
pub fn is_spec_line(line: &str) -> bool {
    LINE_RE.is_match(line.trim())
}

/// Parses a single trimmed, non-blank line. `None` when the line is not a valid entry.
fn parse_line(line: &str) -> Option<Entry> {
    let caps = LINE_RE.captures(line)?;
    let level: u8 = caps[1].parse().ok()?;
    let title = caps[2].trim();
    let page: usize = caps[3].parse().ok()?;
    if level == 0 || title.is_empty() {
        return None;
    }
    Some(Entry::new(level, title, page))
}

/// Parses a whole spec document. Blank lines are skipped; line numbers in errors are 1-based.
pub fn parse_text_spec(text: &str) -> Result<Vec<Entry>, SourceError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut entries = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(entry) => entries.push(entry),
            None => {
                return Err(SourceError::MalformedLine {
                    line_number: idx + 1,
                    line: raw.to_string(),
                });
            }
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_line() {
        let entries = parse_text_spec("[2] Methods | PAGE 4").unwrap();
        assert_eq!(entries, vec![Entry::new(2, "Methods", 4)]);
    }

    #[test]
    fn accepts_flexible_spacing_and_case() {
        let text = "[1]Intro|page 0\n\n   [3]   Deep   dive   |   PaGe   12  \n";
        let entries = parse_text_spec(text).unwrap();
        assert_eq!(
            entries,
            vec![Entry::new(1, "Intro", 0), Entry::new(3, "Deep   dive", 12)]
        );
    }

    #[test]
    fn title_may_contain_pipes() {
        let entries = parse_text_spec("[1] A | B | PAGE 2").unwrap();
        assert_eq!(entries[0].title, "A | B");
    }

    #[test]
    fn missing_brackets_is_malformed() {
        let err = parse_text_spec("[1] Intro | PAGE 0\nMethods PAGE 4").unwrap_err();
        match err {
            SourceError::MalformedLine { line_number, line } => {
                assert_eq!(line_number, 2);
                assert_eq!(line, "Methods PAGE 4");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn level_zero_and_empty_titles_are_malformed() {
        assert!(matches!(
            parse_text_spec("[0] Nothing | PAGE 1"),
            Err(SourceError::MalformedLine { line_number: 1, .. })
        ));
        assert!(matches!(
            parse_text_spec("[1]   | PAGE 1"),
            Err(SourceError::MalformedLine { .. })
        ));
        assert!(matches!(
            parse_text_spec("[999] Too deep | PAGE 1"),
            Err(SourceError::MalformedLine { .. })
        ));
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let entries = parse_text_spec("\u{feff}[1] Intro | PAGE 0").unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn detects_spec_lines() {
        assert!(is_spec_line("  [1] Intro | PAGE 0"));
        assert!(!is_spec_line("Introduction"));
    }
}
