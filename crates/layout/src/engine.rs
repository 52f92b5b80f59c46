//! The pagination state machine that turns resolved entries into draw and link instructions.

use crate::algorithms::{CursorState, LayoutCursor};
use crate::config::{LayoutConfig, OverflowPolicy};
use crate::text::wrap_lines;
use log::{debug, warn};
use tocpress_traits::TextMeasure;
use tocpress_types::{Point, Rect, ResolvedEntry, TextStyle};

/// A single line of text to draw on a generated page.
///
/// `page` is the 0-based index among the generated pages and `origin` is the
/// baseline start, in top-down coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawInstruction {
    pub page: usize,
    pub origin: Point,
    pub text: String,
    pub style: TextStyle,
}

/// The clickable area of one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRegion {
    pub page: usize,
    pub rect: Rect,
    /// 0-based page index in the document after insertion.
    pub target_page: usize,
    /// Position of the entry this region belongs to.
    pub entry_index: usize,
}

/// Everything one layout run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TocLayout {
    pub draws: Vec<DrawInstruction>,
    pub links: Vec<LinkRegion>,
    pub pages_allocated: usize,
}

impl TocLayout {
    /// Draw instructions for one generated page, in drawing order.
    pub fn draws_on(&self, page: usize) -> impl Iterator<Item = &DrawInstruction> {
        self.draws.iter().filter(move |d| d.page == page)
    }

    pub fn links_on(&self, page: usize) -> impl Iterator<Item = &LinkRegion> {
        self.links.iter().filter(move |l| l.page == page)
    }
}

/// The lines of one entry that landed on the page of its first line.
struct Span {
    page: usize,
    first_y: f32,
    last_y: f32,
    width: f32,
}

pub struct LayoutEngine<'a> {
    config: &'a LayoutConfig,
    measure: &'a dyn TextMeasure,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(config: &'a LayoutConfig, measure: &'a dyn TextMeasure) -> Self {
        Self { config, measure }
    }

    pub fn config(&self) -> &LayoutConfig {
        self.config
    }

    /// Lays out `entries` in order, starting on a fresh first page.
    ///
    /// Never fails: titles that do not fit are wrapped, oversized words get a
    /// line of their own, and running out of vertical space allocates a page.
    pub fn layout(&self, entries: &[ResolvedEntry]) -> TocLayout {
        let config = self.config;
        let spacing = config.line_spacing();
        let style = config.entry_style();
        let mut output = TocLayout::default();
        let mut cursor = LayoutCursor::new(config.first_entry_y());

        if let Some(heading) = config.heading() {
            output.draws.push(DrawInstruction {
                page: 0,
                origin: Point::new(config.left_margin, config.top_margin),
                text: heading.to_string(),
                style: config.heading_style(),
            });
        }

        if entries.is_empty() {
            warn!("No table-of-contents entries; generating a page with the heading only.");
        }

        let mut truncated_last = false;
        for (entry_index, entry) in entries.iter().enumerate() {
            if truncated_last {
                cursor.break_page(config.top_margin);
                debug!("Allocated TOC page {} after truncation.", cursor.page());
                truncated_last = false;
            }

            let indent = config.indent(entry.level());
            let x = config.left_margin + indent;
            let lines = wrap_lines(entry.title(), config.wrap_width(entry.level()), |s| {
                self.measure.text_width(s, config.font_size)
            });

            let mut span: Option<Span> = None;

            for (line_idx, line) in lines.iter().enumerate() {
                if cursor.check_overflow(config.max_y) == CursorState::Overflow {
                    if config.overflow == OverflowPolicy::Truncate && line_idx > 0 {
                        warn!(
                            "Dropped {} line(s) of '{}' that did not fit on TOC page {}.",
                            lines.len() - line_idx,
                            entry.title(),
                            cursor.page() + 1
                        );
                        truncated_last = true;
                        break;
                    }
                    cursor.break_page(config.top_margin);
                    debug!("Allocated TOC page {}.", cursor.page());
                }

                let text = if line.is_last_line_of_entry {
                    format!("{}{}{}", line.text, config.leader, entry.display_page)
                } else {
                    line.text.clone()
                };

                let y = cursor.y();
                let width = self.measure.text_width(&text, config.font_size);
                match span.as_mut() {
                    Some(s) if s.page == cursor.page() => {
                        s.last_y = y;
                        s.width = s.width.max(width);
                    }
                    Some(_) => {}
                    None => {
                        span = Some(Span {
                            page: cursor.page(),
                            first_y: y,
                            last_y: y,
                            width,
                        })
                    }
                }

                output.draws.push(DrawInstruction {
                    page: cursor.page(),
                    origin: Point::new(x, y),
                    text,
                    style: style.clone(),
                });
                cursor.advance(spacing);
            }

            if let Some(span) = span {
                output.links.push(LinkRegion {
                    page: span.page,
                    rect: Rect::new(x, span.first_y - spacing, x + span.width, span.last_y),
                    target_page: entry.link_target_page,
                    entry_index,
                });
            }
        }

        output.pages_allocated = cursor.page_count();
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::Helvetica;
    use crate::mapper::compute_targets;
    use tocpress_traits::MonospaceMeasure;
    use tocpress_types::Entry;

    fn resolved(entries: &[Entry], inserted: usize) -> Vec<ResolvedEntry> {
        compute_targets(entries, inserted)
    }

    fn many(n: usize) -> Vec<Entry> {
        (0..n)
            .map(|i| Entry::new(1, format!("Section {}", i + 1), i))
            .collect()
    }

    #[test]
    fn single_entry_on_one_page() {
        let config = LayoutConfig::default();
        let engine = LayoutEngine::new(&config, &Helvetica);
        let layout = engine.layout(&resolved(&[Entry::new(1, "Intro", 0)], 1));

        assert_eq!(layout.pages_allocated, 1);
        assert_eq!(layout.draws.len(), 2);
        assert_eq!(layout.draws[0].text, "Table of Contents");
        assert_eq!(layout.draws[0].origin, Point::new(72.0, 36.0));
        assert_eq!(layout.draws[1].origin, Point::new(72.0, 70.0));
        assert_eq!(layout.links.len(), 1);
        assert_eq!(layout.links[0].target_page, 1);
    }

    #[test]
    fn labels_carry_shifted_pages() {
        let config = LayoutConfig::default();
        let engine = LayoutEngine::new(&config, &Helvetica);
        let entries = [Entry::new(1, "Intro", 0), Entry::new(1, "Body", 5)];
        let layout = engine.layout(&resolved(&entries, 1));

        assert_eq!(layout.draws[1].text, "Intro .......... 1");
        assert_eq!(layout.draws[2].text, "Body .......... 6");
        let targets: Vec<usize> = layout.links.iter().map(|l| l.target_page).collect();
        assert_eq!(targets, vec![1, 6]);
    }

    #[test]
    fn multi_line_title_gets_one_region_over_all_lines() {
        let config = LayoutConfig {
            heading: None,
            max_line_width: 55.0,
            ..Default::default()
        };
        // 0.5em at 11pt: ten characters per line.
        let measure = MonospaceMeasure::new(0.5);
        let engine = LayoutEngine::new(&config, &measure);
        let layout = engine.layout(&resolved(&[Entry::new(1, "alpha beta gamma delta", 2)], 1));

        let lines: Vec<&str> = layout.draws.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(lines, vec!["alpha beta", "gamma", "delta .......... 3"]);
        assert_eq!(layout.links.len(), 1);

        let spacing = config.line_spacing();
        let link = &layout.links[0];
        let first_y = layout.draws[0].origin.y;
        let last_y = layout.draws[2].origin.y;
        assert!((link.rect.y0 - (first_y - spacing)).abs() < 1e-4);
        assert!((link.rect.y1 - last_y).abs() < 1e-4);
        assert_eq!(link.rect.x0, 72.0);
        let width = measure.text_width("delta .......... 3", 11.0);
        assert!((link.rect.x1 - (72.0 + width)).abs() < 1e-4);
        for draw in &layout.draws {
            assert!(link.rect.spans_y(draw.origin.y));
        }
    }

    #[test]
    fn hundred_entries_span_three_pages_without_crossing_max_y() {
        let config = LayoutConfig::default();
        let engine = LayoutEngine::new(&config, &Helvetica);
        let layout = engine.layout(&resolved(&many(100), 3));

        // 48 entries fit on the first page (70..=793.8), 50 on the next (36..=790.6).
        assert_eq!(layout.pages_allocated, 3);
        assert_eq!(layout.links.len(), 100);
        assert!(layout.draws.iter().all(|d| d.origin.y <= config.max_y));
        assert_eq!(layout.links_on(0).count(), 48);
        assert_eq!(layout.links_on(1).count(), 50);
        assert_eq!(layout.links_on(2).count(), 2);
    }

    #[test]
    fn overflowing_entry_continues_on_next_page() {
        let config = LayoutConfig {
            heading: None,
            max_y: 70.0,
            max_line_width: 27.5,
            ..Default::default()
        };
        // Five characters per line, so every word is a line of its own.
        let measure = MonospaceMeasure::new(0.5);
        let engine = LayoutEngine::new(&config, &measure);
        // Lines at 36, 51.4, 66.8 fit; the fourth line needs a new page.
        let layout = engine.layout(&resolved(&[Entry::new(1, "one two three four", 0)], 2));

        assert_eq!(layout.pages_allocated, 2);
        let pages: Vec<usize> = layout.draws.iter().map(|d| d.page).collect();
        assert_eq!(pages, vec![0, 0, 0, 1]);
        assert_eq!(layout.draws[3].origin.y, 36.0);
        assert_eq!(layout.draws[3].text, "four .......... 2");

        // The region stays with the first line, over the three lines on page 0.
        assert_eq!(layout.links.len(), 1);
        let link = &layout.links[0];
        assert_eq!(link.page, 0);
        assert!((link.rect.y0 - (36.0 - config.line_spacing())).abs() < 1e-4);
        assert_eq!(link.rect.y1, layout.draws[2].origin.y);
        let widest = measure.text_width("three", 11.0);
        assert!((link.rect.x1 - (72.0 + widest)).abs() < 1e-4);
    }

    #[test]
    fn truncate_drops_remaining_lines_and_breaks_before_next_entry() {
        let config = LayoutConfig {
            heading: None,
            max_y: 70.0,
            max_line_width: 27.5,
            overflow: OverflowPolicy::Truncate,
            ..Default::default()
        };
        let measure = MonospaceMeasure::new(0.5);
        let engine = LayoutEngine::new(&config, &measure);
        let entries = [
            Entry::new(1, "one two three four", 0),
            Entry::new(1, "next", 1),
        ];
        let layout = engine.layout(&resolved(&entries, 2));

        let texts: Vec<&str> = layout.draws.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three", "next .......... 3"]);
        assert_eq!(layout.draws[3].page, 1);
        assert_eq!(layout.draws[3].origin.y, 36.0);
        assert_eq!(layout.links.len(), 2);
        assert_eq!(layout.links[0].page, 0);
        assert_eq!(layout.pages_allocated, 2);
    }

    #[test]
    fn deeper_levels_are_indented() {
        let config = LayoutConfig::default();
        let engine = LayoutEngine::new(&config, &Helvetica);
        let entries = [Entry::new(1, "Top", 0), Entry::new(3, "Deep", 0)];
        let layout = engine.layout(&resolved(&entries, 1));

        assert_eq!(layout.draws[1].origin.x, 72.0);
        assert_eq!(layout.draws[2].origin.x, 112.0);
        assert_eq!(layout.links[1].rect.x0, 112.0);
    }

    #[test]
    fn without_heading_entries_start_at_top_margin() {
        let config = LayoutConfig {
            heading: None,
            ..Default::default()
        };
        let engine = LayoutEngine::new(&config, &Helvetica);
        let layout = engine.layout(&resolved(&[Entry::new(1, "Intro", 0)], 1));

        assert_eq!(layout.draws.len(), 1);
        assert_eq!(layout.draws[0].origin.y, 36.0);
    }

    #[test]
    fn zero_entries_still_allocate_one_page() {
        let config = LayoutConfig::default();
        let engine = LayoutEngine::new(&config, &Helvetica);
        let layout = engine.layout(&[]);

        assert_eq!(layout.pages_allocated, 1);
        assert_eq!(layout.draws.len(), 1);
        assert!(layout.links.is_empty());
    }

    #[test]
    fn page_count_does_not_depend_on_labels() {
        let config = LayoutConfig::default();
        let engine = LayoutEngine::new(&config, &Helvetica);
        let entries = many(180);
        let measured = engine.layout(&resolved(&entries, 0)).pages_allocated;
        let final_run = engine.layout(&resolved(&entries, measured)).pages_allocated;
        assert_eq!(measured, final_run);
        assert!(measured > 1);
    }
}
