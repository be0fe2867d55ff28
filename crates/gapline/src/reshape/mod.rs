//! Long-format facts derived from wide tables.

mod melt;
mod metric;

pub use melt::{FactRow, facts, melt};
pub use metric::Metric;
