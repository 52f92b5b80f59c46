use lopdf::{Document, ObjectId};
use std::collections::HashMap;
use std::path::Path;
use tocpress::{PdfDocument, TocDocument};
use tocpress_types::OutlineItem;

pub fn load(path: &Path) -> Document {
    Document::load(path).unwrap()
}

pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

pub fn page_bytes(doc: &Document, index: usize) -> Vec<u8> {
    let id = page_ids(doc)[index];
    doc.get_page_content(id).unwrap()
}

/// Raw content stream of the page at `index`, lossily decoded.
pub fn page_content(doc: &Document, index: usize) -> String {
    String::from_utf8_lossy(&page_bytes(doc, index)).into_owned()
}

/// Target page indices of the GoTo link annotations on the page at `index`.
pub fn link_targets(doc: &Document, index: usize) -> Vec<usize> {
    let ids = page_ids(doc);
    let index_of: HashMap<ObjectId, usize> = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
    let page = doc.get_dictionary(ids[index]).unwrap();
    let Ok(annots) = page.get(b"Annots") else {
        return Vec::new();
    };
    annots
        .as_array()
        .unwrap()
        .iter()
        .map(|annot| {
            let annot = doc.get_dictionary(annot.as_reference().unwrap()).unwrap();
            assert_eq!(annot.get(b"Subtype").unwrap().as_name().unwrap(), b"Link");
            let action = doc
                .get_dictionary(annot.get(b"A").unwrap().as_reference().unwrap())
                .unwrap();
            let dest = action.get(b"D").unwrap().as_array().unwrap();
            index_of[&dest[0].as_reference().unwrap()]
        })
        .collect()
}

pub fn outline_items(path: &Path) -> Vec<OutlineItem> {
    PdfDocument::open(path).unwrap().existing_outline().unwrap()
}

pub fn has_outline(doc: &Document) -> bool {
    let catalog_id = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
    doc.get_dictionary(catalog_id).unwrap().has(b"Outlines")
}
