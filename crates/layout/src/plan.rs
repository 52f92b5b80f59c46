//! Sizing the table of contents before the document is touched.
//!
//! The number of generated pages decides every page label, and the labels are
//! part of the text being laid out. Layout therefore runs once with no pages
//! inserted to learn the page count, then again with the targets shifted by
//! that count, until the count no longer changes.

use crate::LayoutError;
use crate::config::LayoutConfig;
use crate::engine::{LayoutEngine, TocLayout};
use crate::mapper::compute_targets;
use log::debug;
use tocpress_traits::TextMeasure;
use tocpress_types::{Entry, ResolvedEntry};

/// Upper bound on layout passes. Labels never change how titles wrap, so two suffice in practice.
pub const MAX_PASSES: usize = 4;

/// A settled layout together with the entries it was computed for.
#[derive(Debug, Clone)]
pub struct TocPlan {
    pub entries: Vec<ResolvedEntry>,
    pub layout: TocLayout,
}

impl TocPlan {
    /// Number of pages to insert at the front of the document.
    pub fn toc_pages(&self) -> usize {
        self.layout.pages_allocated
    }
}

pub fn plan_toc(
    entries: &[Entry],
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
) -> Result<TocPlan, LayoutError> {
    config.validate()?;
    let engine = LayoutEngine::new(config, measure);

    let mut inserted = 0;
    for pass in 1..=MAX_PASSES {
        let resolved = compute_targets(entries, inserted);
        let layout = engine.layout(&resolved);
        debug!(
            "Layout pass {}: assumed {} TOC page(s), allocated {}.",
            pass, inserted, layout.pages_allocated
        );
        if pass > 1 && layout.pages_allocated == inserted {
            return Ok(TocPlan {
                entries: resolved,
                layout,
            });
        }
        inserted = layout.pages_allocated;
    }

    Err(LayoutError::PaginationUnstable { passes: MAX_PASSES })
}
