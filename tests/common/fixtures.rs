use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, StringFormat, Stream, dictionary};
use std::fs::File;
use std::path::{Path, PathBuf};
use tocpress::{PdfDocument, TocDocument};
use tocpress_types::OutlineItem;

/// Creates a document with `num_pages` US Letter pages whose content reads "Page N".
pub fn create_dummy_pdf(num_pages: u32) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut page_ids = vec![];
    for i in 1..=num_pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Td", vec![100.into(), 700.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::String(format!("Page {}", i).into_bytes(), StringFormat::Literal)],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(Object::Reference(page_id));
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids,
        "Count" => num_pages as i64,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, pages_dict.into());

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Like [`create_dummy_pdf`], with bookmarks for `(level, title, page)` triples.
pub fn create_pdf_with_outline(num_pages: u32, outline: &[(u8, &str, usize)]) -> Document {
    let mut pdf = PdfDocument::from_document(create_dummy_pdf(num_pages));
    let items: Vec<OutlineItem> = outline
        .iter()
        .map(|&(level, title, page)| OutlineItem::new(level, title, page))
        .collect();
    pdf.set_outline(&items).unwrap();
    pdf.into_document().unwrap()
}

pub fn write_pdf(dir: &Path, name: &str, mut doc: Document) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();
    doc.save_to(&mut file).unwrap();
    path
}

pub fn write_text(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
