//! Page index reconciliation for table-of-contents pages inserted at the front.
//!
//! Every original page moves back by exactly the number of inserted pages, so
//! both the printed label and the link target are `original_page + inserted`.
//! The label uses the shifted 0-based index as-is: with one inserted page the
//! first original page is labelled `1` and linked to index `1`.

use tocpress_types::{Entry, OutlineItem, ResolvedEntry};

/// Resolves display labels and link targets for `entries` once `toc_pages_inserted`
/// pages have been placed ahead of the original content. Order is preserved.
pub fn compute_targets(entries: &[Entry], toc_pages_inserted: usize) -> Vec<ResolvedEntry> {
    entries
        .iter()
        .map(|entry| {
            let shifted = entry.original_page.saturating_add(toc_pages_inserted);
            ResolvedEntry {
                entry: entry.clone(),
                display_page: shifted,
                link_target_page: shifted,
            }
        })
        .collect()
}

/// The outline to write back into the document, pointing at the shifted pages.
pub fn shift_outline(entries: &[ResolvedEntry]) -> Vec<OutlineItem> {
    entries
        .iter()
        .map(|resolved| {
            OutlineItem::new(
                resolved.level(),
                resolved.title(),
                resolved.link_target_page,
            )
        })
        .collect()
}
