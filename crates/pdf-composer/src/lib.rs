//! A `lopdf` document that can receive generated table-of-contents pages.
//!
//! This crate implements [`TocDocument`] on top of lopdf:
//! - Blank page insertion anywhere in the page tree
//! - Helvetica text on inserted pages
//! - GoTo link annotations and outline rewriting
//! - Outline extraction with named destination lookup

mod encoding;
mod error;
mod outline;

pub use encoding::{decode_title, encode_for_font};
pub use error::ComposerError;

use log::debug;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, StringFormat, Stream, dictionary};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use tocpress_layout::Helvetica;
use tocpress_traits::{DocumentError, TextMeasure, TocDocument};
use tocpress_types::{OutlineItem, Point, Rect, Size, TextStyle};

/// Resource name of the font on inserted pages.
const FONT_RESOURCE: &str = "F1";

/// Content of a page this document created. Operations reach the page's
/// content stream in [`PdfDocument::flush`].
struct Canvas {
    content_id: ObjectId,
    height: f32,
    operations: Vec<Operation>,
    dirty: bool,
}

pub struct PdfDocument {
    doc: Document,
    font_id: Option<ObjectId>,
    canvases: HashMap<ObjectId, Canvas>,
}

impl PdfDocument {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ComposerError> {
        Ok(Self::from_document(Document::load(path)?))
    }

    pub fn load_mem(bytes: &[u8]) -> Result<Self, ComposerError> {
        Ok(Self::from_document(Document::load_mem(bytes)?))
    }

    pub fn from_document(doc: Document) -> Self {
        Self {
            doc,
            font_id: None,
            canvases: HashMap::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn into_document(mut self) -> Result<Document, ComposerError> {
        self.flush()?;
        Ok(self.doc)
    }

    pub fn save_to<W: Write>(&mut self, writer: &mut W) -> Result<(), ComposerError> {
        self.flush()?;
        self.doc.save_to(writer)?;
        Ok(())
    }

    /// Encodes the text drawn since the last flush into the content streams of the inserted pages.
    pub fn flush(&mut self) -> Result<(), ComposerError> {
        for canvas in self.canvases.values_mut().filter(|c| c.dirty) {
            let encoded = Content {
                operations: canvas.operations.clone(),
            }
            .encode()?;
            self.doc
                .get_object_mut(canvas.content_id)?
                .as_stream_mut()?
                .set_content(encoded);
            canvas.dirty = false;
        }
        Ok(())
    }

    /// Object ids of all pages in order.
    fn page_ids(&self) -> Vec<ObjectId> {
        self.doc.get_pages().into_values().collect()
    }

    fn page_id(&self, index: usize) -> Result<ObjectId, ComposerError> {
        let pages = self.page_ids();
        pages
            .get(index)
            .copied()
            .ok_or(ComposerError::PageOutOfRange {
                index,
                page_count: pages.len(),
            })
    }

    /// Media box size of the first page, following inherited attributes. A4 when there is none.
    pub fn page_size(&self) -> Size {
        self.page_ids()
            .first()
            .and_then(|&id| self.media_box(id))
            .unwrap_or_else(Size::a4)
    }

    fn media_box(&self, page_id: ObjectId) -> Option<Size> {
        let mut node = self.doc.get_dictionary(page_id).ok()?;
        // Inheritance chains are short; the bound only protects against malformed cycles.
        for _ in 0..32 {
            if let Ok(mb) = node.get(b"MediaBox") {
                let (_, mb) = self.doc.dereference(mb).ok()?;
                let values: Vec<f32> = mb
                    .as_array()
                    .ok()?
                    .iter()
                    .filter_map(|v| number(self.doc.dereference(v).ok()?.1))
                    .collect();
                if let &[x0, y0, x1, y1] = values.as_slice() {
                    return Some(Size::new((x1 - x0).abs(), (y1 - y0).abs()));
                }
                return None;
            }
            let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
            node = self.doc.get_dictionary(parent).ok()?;
        }
        None
    }

    fn font_id(&mut self) -> ObjectId {
        *self.font_id.get_or_insert_with(|| {
            self.doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => Helvetica::POSTSCRIPT_NAME,
                "Encoding" => "WinAnsiEncoding",
            })
        })
    }

    fn insert_page(&mut self, at: usize) -> Result<ObjectId, ComposerError> {
        let pages = self.page_ids();
        if at > pages.len() {
            return Err(ComposerError::PageOutOfRange {
                index: at,
                page_count: pages.len(),
            });
        }

        let size = self.page_size();
        let catalog = self.doc.get_dictionary(outline::catalog_id(&self.doc)?)?;
        let root_pages_id = catalog.get(b"Pages")?.as_reference()?;

        // The new page joins the parent of the page it displaces, or the root node when appending.
        let (parent_id, position) = match pages.get(at) {
            Some(&displaced) => {
                let parent_id = self
                    .doc
                    .get_dictionary(displaced)?
                    .get(b"Parent")?
                    .as_reference()?;
                let kids = self.doc.get_dictionary(parent_id)?.get(b"Kids")?.as_array()?;
                let position = kids
                    .iter()
                    .position(|k| k.as_reference().is_ok_and(|id| id == displaced))
                    .ok_or_else(|| {
                        ComposerError::Structure(format!(
                            "Page {:?} is missing from the Kids of its parent {:?}",
                            displaced, parent_id
                        ))
                    })?;
                (parent_id, position)
            }
            None => {
                let kids = self.doc.get_dictionary(root_pages_id)?.get(b"Kids")?.as_array()?;
                (root_pages_id, kids.len())
            }
        };

        let font_id = self.font_id();
        let content_id = self.doc.add_object(Stream::new(dictionary! {}, Vec::new()));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => parent_id,
            "MediaBox" => vec![0.into(), 0.into(), size.width.into(), size.height.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { FONT_RESOURCE => font_id },
            },
        });

        let parent = self.doc.get_object_mut(parent_id)?.as_dict_mut()?;
        parent
            .get_mut(b"Kids")?
            .as_array_mut()?
            .insert(position, Object::Reference(page_id));

        // Every ancestor counts the new leaf.
        let mut node_id = Some(parent_id);
        let mut depth = 0;
        while let Some(id) = node_id {
            depth += 1;
            if depth > 64 {
                return Err(ComposerError::Structure("Page tree is too deep or cyclic".into()));
            }
            let node = self.doc.get_object_mut(id)?.as_dict_mut()?;
            let count = node.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
            node.set("Count", count + 1);
            node_id = node.get(b"Parent").and_then(Object::as_reference).ok();
        }

        self.canvases.insert(
            page_id,
            Canvas {
                content_id,
                height: size.height,
                operations: Vec::new(),
                dirty: false,
            },
        );
        debug!("Inserted blank page {:?} at index {}.", page_id, at);
        Ok(page_id)
    }

    fn canvas(&mut self, page: ObjectId) -> Result<&mut Canvas, ComposerError> {
        self.canvases.get_mut(&page).ok_or_else(|| {
            ComposerError::Structure(format!("Page {:?} was not inserted by this document", page))
        })
    }

    fn push_text(
        &mut self,
        page: ObjectId,
        origin: Point,
        text: &str,
        style: &TextStyle,
    ) -> Result<(), ComposerError> {
        self.canvas(page)?;
        let font_id = self.font_id();
        let bytes = encode_for_font(&self.doc, self.doc.get_dictionary(font_id)?, text)?;
        let canvas = self.canvas(page)?;
        let [r, g, b] = style.color.to_unit_rgb();
        canvas.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![FONT_RESOURCE.into(), style.font_size.into()]),
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new("Td", vec![origin.x.into(), (canvas.height - origin.y).into()]),
            Operation::new("Tj", vec![Object::String(bytes, StringFormat::Literal)]),
            Operation::new("ET", vec![]),
        ]);
        canvas.dirty = true;
        Ok(())
    }

    fn push_link(&mut self, page: ObjectId, rect: Rect, target_page: usize) -> Result<(), ComposerError> {
        let target_id = self.page_id(target_page)?;
        let height = self.canvas(page)?.height;

        let dest = vec![Object::Reference(target_id), "Fit".into()];
        let action = dictionary! { "Type" => "Action", "S" => "GoTo", "D" => dest };
        let action_id = self.doc.add_object(action);
        let rect: Vec<Object> = rect.flip_y(height).into_iter().map(Object::from).collect();
        let annot_id = self.doc.add_object(dictionary! {
            "Type" => "Annot", "Subtype" => "Link", "Rect" => rect,
            "Border" => vec![0.into(), 0.into(), 0.into()], "A" => action_id,
        });

        let page_dict = self.doc.get_object_mut(page)?.as_dict_mut()?;
        match page_dict.get_mut(b"Annots") {
            Ok(annots) => annots.as_array_mut()?.push(Object::Reference(annot_id)),
            Err(_) => page_dict.set("Annots", vec![Object::Reference(annot_id)]),
        }
        Ok(())
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

impl TextMeasure for PdfDocument {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        Helvetica.text_width(text, font_size)
    }
}

impl TocDocument for PdfDocument {
    type Page = ObjectId;

    fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    fn existing_outline(&self) -> Result<Vec<OutlineItem>, DocumentError> {
        Ok(outline::read_outline(&self.doc)?)
    }

    fn insert_blank_page(&mut self, at: usize) -> Result<ObjectId, DocumentError> {
        Ok(self.insert_page(at)?)
    }

    fn draw_text(
        &mut self,
        page: ObjectId,
        origin: Point,
        text: &str,
        style: &TextStyle,
    ) -> Result<(), DocumentError> {
        Ok(self.push_text(page, origin, text, style)?)
    }

    fn add_navigation_link(
        &mut self,
        page: ObjectId,
        rect: Rect,
        target_page: usize,
    ) -> Result<(), DocumentError> {
        Ok(self.push_link(page, rect, target_page)?)
    }

    fn set_outline(&mut self, items: &[OutlineItem]) -> Result<(), DocumentError> {
        Ok(outline::write_outline(&mut self.doc, items)?)
    }
}
