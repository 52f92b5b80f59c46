//! Insert a navigable table of contents at the front of a PDF.
//!
//! The pipeline resolves entries from the document outline or a side file,
//! sizes the table of contents so that every page label accounts for the pages
//! being inserted, draws it onto new front pages with one link per entry and
//! writes the result atomically.
//!
//! ```ignore
//! use tocpress::{SourceSpec, TocJob};
//!
//! let job = TocJob::new("report.pdf", "report-toc.pdf")
//!     .with_source(SourceSpec::TitlesFile("titles.txt".into()));
//! let report = tocpress::run(&job)?;
//! println!("inserted {} page(s)", report.toc_pages);
//! ```

pub mod error;
pub mod job;

pub use error::TocError;
pub use job::{SourceSpec, TocJob, load_layout_config, parse_layout_config};

pub use tocpress_layout::{LayoutConfig, OverflowPolicy};
pub use tocpress_pdf_composer::PdfDocument;
pub use tocpress_source::EntrySource;
pub use tocpress_traits::TocDocument;
pub use tocpress_types::Entry;

use log::{info, warn};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tocpress_layout::{plan_toc, shift_outline};

/// Summary of a completed insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocReport {
    /// Pages inserted at the front of the document.
    pub toc_pages: usize,
    pub entries: usize,
    pub links: usize,
}

/// Lays out `entries` and applies the table of contents to `doc`.
///
/// Every entry is checked against the document before anything is modified,
/// so an error leaves `doc` untouched unless the document itself fails midway.
/// With `rewrite_outline` the document outline is replaced by the entries,
/// pointing at their shifted pages.
pub fn insert_toc<D: TocDocument>(
    doc: &mut D,
    entries: &[Entry],
    config: &LayoutConfig,
    rewrite_outline: bool,
) -> Result<TocReport, TocError> {
    let page_count = doc.page_count();
    if let Some(entry) = entries.iter().find(|e| e.original_page >= page_count) {
        return Err(TocError::TargetOutOfRange {
            title: entry.title.clone(),
            page: entry.original_page,
            page_count,
        });
    }
    if entries.is_empty() {
        warn!("No entries to list; the table of contents will only carry its heading.");
    }

    let plan = plan_toc(entries, config, &*doc)?;
    let toc_pages = plan.toc_pages();
    info!(
        "Laid out {} entries on {} TOC page(s).",
        entries.len(),
        toc_pages
    );

    let mut pages = Vec::with_capacity(toc_pages);
    for index in 0..toc_pages {
        pages.push(doc.insert_blank_page(index)?);
    }
    for draw in &plan.layout.draws {
        doc.draw_text(pages[draw.page], draw.origin, &draw.text, &draw.style)?;
    }
    for link in &plan.layout.links {
        doc.add_navigation_link(pages[link.page], link.rect, link.target_page)?;
    }
    if rewrite_outline {
        doc.set_outline(&shift_outline(&plan.entries))?;
    }

    Ok(TocReport {
        toc_pages,
        entries: entries.len(),
        links: plan.layout.links.len(),
    })
}

/// Runs a job end to end. The output file only appears once everything succeeded.
pub fn run(job: &TocJob) -> Result<TocReport, TocError> {
    let source = job.source.open()?;
    info!("Opening {}", job.input_path.display());
    let mut doc = PdfDocument::open(&job.input_path)?;

    let outline = if source.needs_outline() {
        let outline = doc.existing_outline()?;
        if outline.is_empty() {
            warn!("{} has no usable outline.", job.input_path.display());
        }
        outline
    } else {
        Vec::new()
    };
    let entries = source.resolve(&outline)?;

    let report = insert_toc(&mut doc, &entries, &job.layout, source.needs_outline())?;
    save_atomically(&mut doc, &job.output_path)?;
    info!(
        "Wrote {} with {} TOC page(s) and {} links.",
        job.output_path.display(),
        report.toc_pages,
        report.links
    );
    Ok(report)
}

/// Writes into a temporary file next to `path` and renames it into place.
fn save_atomically(doc: &mut PdfDocument, path: &Path) -> Result<(), TocError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        doc.save_to(&mut writer)?;
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
