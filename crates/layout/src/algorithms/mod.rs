pub mod pagination;

pub use pagination::{CursorState, LayoutCursor};
