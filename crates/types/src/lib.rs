pub mod color;
pub mod document;
pub mod geometry;

pub use color::Color;
pub use document::{Entry, OutlineItem, ResolvedEntry, TextStyle};
pub use geometry::{Point, Rect, Size};
