pub mod document;
pub mod measure;

pub use document::{DocumentError, TocDocument};
pub use measure::{MonospaceMeasure, TextMeasure};
