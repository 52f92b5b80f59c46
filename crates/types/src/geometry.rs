/// A position in top-down page coordinates (origin at the top-left corner).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in top-down page coordinates, `y0 <= y1`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    /// Builds a rectangle from two corners, normalizing the order of the coordinates.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Whether the vertical span of the rectangle includes `y`.
    pub fn spans_y(&self, y: f32) -> bool {
        const EPSILON: f32 = 0.01;
        y >= self.y0 - EPSILON && y <= self.y1 + EPSILON
    }

    /// Converts to PDF user space (origin at the bottom-left) for a page of the given height.
    pub fn flip_y(&self, page_height: f32) -> [f32; 4] {
        [self.x0, page_height - self.y1, self.x1, page_height - self.y0]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// ISO A4 in points.
    pub fn a4() -> Self {
        Self::new(595.0, 842.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_normalizes_corners() {
        let r = Rect::new(10.0, 50.0, 5.0, 20.0);
        assert_eq!(r, Rect { x0: 5.0, y0: 20.0, x1: 10.0, y1: 50.0 });
        assert_eq!(r.width(), 5.0);
        assert_eq!(r.height(), 30.0);
    }

    #[test]
    fn flip_y_maps_to_pdf_user_space() {
        let r = Rect::new(72.0, 54.6, 200.0, 70.0);
        let [x0, y0, x1, y1] = r.flip_y(842.0);
        assert_eq!(x0, 72.0);
        assert_eq!(x1, 200.0);
        assert!((y0 - 772.0).abs() < 0.001);
        assert!((y1 - 787.4).abs() < 0.001);
    }

    #[test]
    fn spans_y_is_inclusive() {
        let r = Rect::new(0.0, 10.0, 1.0, 20.0);
        assert!(r.spans_y(10.0));
        assert!(r.spans_y(20.0));
        assert!(!r.spans_y(20.5));
    }
}
