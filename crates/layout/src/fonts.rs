//! Font metrics for the standard Type1 font used on table-of-contents pages.
//!
//! The generated pages reference Helvetica without embedding it, so the
//! advance widths come from the Adobe font metrics for that face rather than
//! from a font file.

use tocpress_traits::TextMeasure;

/// Helvetica advance widths for codes 32..=126, in 1/1000 em.
const HELVETICA_ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 32..47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 48..63
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 64..79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 80..95
    222, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 96..111
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 112..126
];

/// Helvetica advance widths for U+00A0..=U+00FF, which WinAnsiEncoding places at the same codes.
const HELVETICA_LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // A0..AF
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // B0..BF
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // C0..CF
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // D0..DF
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // E0..EF
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // F0..FF
];

/// Characters WinAnsiEncoding has no code for are drawn as `?`.
const FALLBACK_WIDTH: u16 = 556;

/// Helvetica advance widths of the characters WinAnsiEncoding maps to 0x80..=0x9F.
fn win_ansi_extra_width(c: char) -> Option<u16> {
    let width = match c {
        '\u{20ac}' | '\u{192}' | '\u{2020}' | '\u{2021}' | '\u{2013}' => 556,
        '\u{201a}' | '\u{2018}' | '\u{2019}' => 222,
        '\u{201e}' | '\u{201c}' | '\u{201d}' | '\u{2c6}' | '\u{2039}' | '\u{203a}' | '\u{2dc}' => 333,
        '\u{2026}' | '\u{2030}' | '\u{152}' | '\u{2014}' | '\u{2122}' => 1000,
        '\u{160}' | '\u{178}' => 667,
        '\u{17d}' => 611,
        '\u{2022}' => 350,
        '\u{161}' | '\u{17e}' => 500,
        '\u{153}' => 944,
        _ => return None,
    };
    Some(width)
}

/// The base-14 font every table-of-contents line is set in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Helvetica;

impl Helvetica {
    /// The PostScript name written into the font dictionary.
    pub const POSTSCRIPT_NAME: &'static str = "Helvetica";

    /// Advance width of a single character in 1/1000 em.
    pub fn char_width(c: char) -> u16 {
        match c as u32 {
            code @ 32..=126 => HELVETICA_ASCII_WIDTHS[(code - 32) as usize],
            0..=31 | 127 => 0,
            code @ 0xA0..=0xFF => HELVETICA_LATIN1_WIDTHS[(code - 0xA0) as usize],
            _ => win_ansi_extra_width(c).unwrap_or(FALLBACK_WIDTH),
        }
    }
}

impl TextMeasure for Helvetica {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| Self::char_width(c) as u32).sum();
        units as f32 * font_size / 1000.0
    }
}
