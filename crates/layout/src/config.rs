use crate::LayoutError;
use serde::Deserialize;
use tocpress_types::{Color, TextStyle};

/// What the engine does when an entry's lines run past the bottom of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Allocate a new page and keep drawing the remaining lines of the entry there.
    #[default]
    Continue,
    /// Drop the remaining lines of the entry and start the next entry on a new page.
    ///
    /// An entry whose first line does not fit still moves to a new page whole.
    Truncate,
}

/// Geometry and typography of the generated table-of-contents pages.
///
/// All lengths are in points, with `y` growing downwards from the top edge of
/// the page. The `y` values are text baselines.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// X position of level-1 entries.
    pub left_margin: f32,
    /// Baseline of the first line on continuation pages, and of the heading on the first page.
    pub top_margin: f32,
    /// Lowest baseline a line may be drawn at.
    pub max_y: f32,
    /// Extra indentation for every level below the first.
    pub indent_per_level: f32,
    pub font_size: f32,
    /// Line advance as a multiple of `font_size`.
    pub line_spacing_factor: f32,
    /// Width budget for level-1 titles. Deeper levels lose their indentation from it.
    pub max_line_width: f32,
    /// Heading drawn at the top of the first page, if any.
    pub heading: Option<String>,
    pub heading_font_size: f32,
    /// Distance from the heading baseline to the first entry baseline.
    pub heading_gap: f32,
    /// Separator between the last line of a title and its page label.
    pub leader: String,
    pub entry_color: Color,
    pub heading_color: Color,
    pub overflow: OverflowPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            left_margin: 72.0,
            top_margin: 36.0,
            max_y: 800.0,
            indent_per_level: 20.0,
            font_size: 11.0,
            line_spacing_factor: 1.4,
            max_line_width: 420.0,
            heading: Some("Table of Contents".to_string()),
            heading_font_size: 18.0,
            heading_gap: 34.0,
            leader: " .......... ".to_string(),
            entry_color: Color::BLUE,
            heading_color: Color::BLACK,
            overflow: OverflowPolicy::Continue,
        }
    }
}

impl LayoutConfig {
    pub fn line_spacing(&self) -> f32 {
        self.line_spacing_factor * self.font_size
    }

    /// Baseline of the first entry on the first page.
    pub fn first_entry_y(&self) -> f32 {
        match self.heading() {
            Some(_) => self.top_margin + self.heading_gap,
            None => self.top_margin,
        }
    }

    /// The heading text, treating an empty heading as none.
    pub fn heading(&self) -> Option<&str> {
        self.heading
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }

    pub fn entry_style(&self) -> TextStyle {
        TextStyle::new(self.font_size, self.entry_color)
    }

    pub fn heading_style(&self) -> TextStyle {
        TextStyle::new(self.heading_font_size, self.heading_color)
    }

    /// Width budget for a title at `level`, never narrower than one em.
    pub fn wrap_width(&self, level: u8) -> f32 {
        (self.max_line_width - self.indent(level)).max(self.font_size)
    }

    pub fn indent(&self, level: u8) -> f32 {
        level.saturating_sub(1) as f32 * self.indent_per_level
    }

    /// Checks that the configuration describes a usable page area.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let positive = [
            ("fontSize", self.font_size),
            ("lineSpacingFactor", self.line_spacing_factor),
            ("maxLineWidth", self.max_line_width),
            ("headingFontSize", self.heading_font_size),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        let finite = [
            ("leftMargin", self.left_margin),
            ("topMargin", self.top_margin),
            ("maxY", self.max_y),
            ("indentPerLevel", self.indent_per_level),
            ("headingGap", self.heading_gap),
        ];
        for (name, value) in finite {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.max_y < self.top_margin {
            return Err(LayoutError::InvalidConfig(format!(
                "maxY ({}) must not be above topMargin ({})",
                self.max_y, self.top_margin
            )));
        }
        Ok(())
    }
}
