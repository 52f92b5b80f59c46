/// Whether the cursor is placing lines or waiting for a fresh page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    Drawing,
    Overflow,
}

/// Vertical position on the current table-of-contents page.
///
/// Owned by a single layout run; pages are identified by their 0-based index
/// among the generated pages.
#[derive(Debug, Clone)]
pub struct LayoutCursor {
    page: usize,
    y: f32,
    page_count: usize,
    state: CursorState,
}

impl LayoutCursor {
    /// Starts on a freshly allocated first page with the cursor at `start_y`.
    pub fn new(start_y: f32) -> Self {
        Self {
            page: 0,
            y: start_y,
            page_count: 1,
            state: CursorState::Drawing,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Centralized overflow check: the next line may not start below `max_y`.
    pub fn check_overflow(&mut self, max_y: f32) -> CursorState {
        if self.y > max_y {
            self.state = CursorState::Overflow;
        }
        self.state
    }

    /// Finalizes the current page and continues at `top` on a newly allocated one.
    pub fn break_page(&mut self, top: f32) {
        self.state = CursorState::Overflow;
        self.page += 1;
        self.page_count += 1;
        self.y = top;
        self.state = CursorState::Drawing;
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }
}
