//! The fact-extractor seam.

use std::path::Path;

use crate::config::ExtractOptions;
use crate::core::StructuralRecord;

/// Parses one script file into a [`StructuralRecord`].
///
/// Implementations are total: they never fail. A file that cannot be parsed
/// is reported through the record's `error` field so the batch can carry on
/// and still tally the failure.
///
/// `Send + Sync` is required so the orchestrator can run an extraction on a
/// worker thread when a per-file timeout is configured.
pub trait FactExtractor: Send + Sync {
    /// Extract structural facts from the file at `path`.
    ///
    /// `options` selects which fact families the extractor should populate;
    /// disabled families stay at their empty defaults.
    fn extract(&self, path: &Path, options: &ExtractOptions) -> StructuralRecord;
}
