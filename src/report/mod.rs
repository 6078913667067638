//! Batch report types.

mod types;

pub use types::{BatchResult, BatchStatus, BatchSummary, Insights};
