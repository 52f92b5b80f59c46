use crate::color::Color;

/// One line of the table of contents before layout.
///
/// `original_page` is a 0-based index into the document *before* any
/// table-of-contents pages are inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Nesting level, 1 for top-level entries.
    pub level: u8,
    /// The title shown in the table of contents.
    pub title: String,
    pub original_page: usize,
}

impl Entry {
    pub fn new(level: u8, title: impl Into<String>, original_page: usize) -> Self {
        Self {
            level,
            title: title.into(),
            original_page,
        }
    }
}

/// An entry whose page references account for the inserted table-of-contents pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub entry: Entry,
    /// The page label printed after the title.
    pub display_page: usize,
    /// 0-based index into the document after insertion.
    pub link_target_page: usize,
}

impl ResolvedEntry {
    pub fn level(&self) -> u8 {
        self.entry.level
    }

    pub fn title(&self) -> &str {
        &self.entry.title
    }
}

/// A bookmark as exchanged with the document layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineItem {
    pub level: u8,
    pub title: String,
    /// 0-based page index.
    pub page: usize,
}

impl OutlineItem {
    pub fn new(level: u8, title: impl Into<String>, page: usize) -> Self {
        Self {
            level,
            title: title.into(),
            page,
        }
    }
}

impl From<OutlineItem> for Entry {
    fn from(item: OutlineItem) -> Self {
        Entry::new(item.level, item.title, item.page)
    }
}

/// Font size and fill color for a run of text. The font itself is fixed by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub color: Color,
}

impl TextStyle {
    pub fn new(font_size: f32, color: Color) -> Self {
        Self { font_size, color }
    }
}
