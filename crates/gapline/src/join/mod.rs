//! Joining metric relations into the unified table.

mod joiner;
mod unified;

pub use joiner::{JoinReport, Joiner, MetricCounts};
pub use unified::{UnifiedRow, UnifiedTable};
