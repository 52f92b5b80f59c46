use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid layout configuration: {0}")]
    InvalidConfig(String),
    #[error("Table-of-contents page count did not settle after {passes} layout passes.")]
    PaginationUnstable { passes: usize },
}

pub mod algorithms;
pub mod config;
pub mod engine;
pub mod fonts;
pub mod mapper;
pub mod plan;
pub mod text;

pub use self::config::{LayoutConfig, OverflowPolicy};
pub use self::engine::{DrawInstruction, LayoutEngine, LinkRegion, TocLayout};
pub use self::fonts::Helvetica;
pub use self::mapper::{compute_targets, shift_outline};
pub use self::plan::{MAX_PASSES, TocPlan, plan_toc};
