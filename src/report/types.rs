//! The consolidated batch report.

use serde::{Deserialize, Serialize};

use crate::analyzers::issues::Issue;
use crate::analyzers::layout::DirectoryStats;
use crate::analyzers::patterns::{ArchitectureSummary, PatternCensusEntry};
use crate::analyzers::xref::XrefGraph;
use crate::core::StructuralRecord;

/// The engine's sole output: everything a reporter needs to render one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// RFC 3339 timestamp of report assembly.
    pub generated_at: String,
    pub summary: BatchSummary,
    pub insights: Insights,
    pub cross_references: XrefGraph,
    /// Present only when directory-level analysis was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory_stats: Option<DirectoryStats>,
    /// Every record in input order, failed ones included with their error.
    pub records: Vec<StructuralRecord>,
}

/// Aggregate counts over the batch.
///
/// Per-field totals are sums over successful records only; failed extractions
/// contribute solely to `failed`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub status: BatchStatus,
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub total_methods: usize,
    pub total_properties: usize,
    pub total_signals: usize,
    pub total_constants: usize,
    pub total_cross_file_calls: usize,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// Every input path was processed.
    #[default]
    Complete,
    /// Cancelled mid-run; collected records are intact.
    Partial,
    /// The input path list was empty ("no scripts found").
    NoInput,
}

/// Derived project-level insight block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Insights {
    /// Path of the highest-scoring script (first wins on ties).
    pub most_complex: Option<String>,
    /// Path with the most cross-file calls (first wins on ties).
    pub most_dependencies: Option<String>,
    pub pattern_census: Vec<PatternCensusEntry>,
    pub architecture: ArchitectureSummary,
    pub issues: Vec<Issue>,
    /// Reference cycles between scripts, each sorted, deterministic order.
    pub dependency_cycles: Vec<Vec<String>>,
}
