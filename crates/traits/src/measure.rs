//! Width measurement for the single font used by the table of contents.

/// Measures the advance width of a string of text.
///
/// The layout engine only ever measures text in one font, so implementations
/// carry the font choice themselves and are asked for widths at a given size.
pub trait TextMeasure {
    /// Width of `text` in points when set at `font_size`.
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        (**self).text_width(text, font_size)
    }
}

/// A measure where every character has the same advance, in ems.
///
/// Handy for tests and for reasoning about wrapping without real font metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub advance_em: f32,
}

impl MonospaceMeasure {
    pub fn new(advance_em: f32) -> Self {
        Self { advance_em }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * self.advance_em * font_size
    }
}
