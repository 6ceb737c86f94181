//! Aggregation of benchmark records and comparison against the baseline deployment.

pub mod aggregate;
pub mod compare;
pub mod metric;

pub use aggregate::{aggregate, PivotRow, PivotTable, BASELINE_DEPLOYMENT};
pub use compare::{compare_row, compare_table, Comparison, Improvement};
pub use metric::Metric;
