//! Text encoding for page content and outline titles, delegated to lopdf's tables.

use lopdf::{Dictionary, Document, Object};

/// Bytes for a `Tj` operand shown with `font`, in the encoding the font dictionary declares.
///
/// Characters the encoding has no code for become `?`.
pub fn encode_for_font(doc: &Document, font: &Dictionary, text: &str) -> lopdf::Result<Vec<u8>> {
    let encoding = font.get_font_encoding(doc)?;
    let mut buf = [0u8; 4];
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        let code = Document::encode_text(&encoding, c.encode_utf8(&mut buf));
        if code.is_empty() {
            bytes.push(b'?');
        } else {
            bytes.extend(code);
        }
    }
    Ok(bytes)
}

/// Decodes an outline title: UTF-16BE or UTF-8 with a byte order mark, PDFDocEncoding otherwise.
pub fn decode_title(obj: &Object) -> Option<String> {
    let title = lopdf::decode_text_string(obj).ok()?;
    Some(title.trim_start_matches('\u{feff}').to_string())
}
