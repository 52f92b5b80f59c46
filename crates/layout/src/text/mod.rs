pub mod wrapper;

pub use wrapper::{WrappedLine, wrap, wrap_lines};
