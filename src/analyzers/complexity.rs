//! Complexity scoring and stable ranking.
//!
//! The score is a weighted linear combination of structural counts, used only
//! for relative ranking within a batch; it is never reported as an absolute
//! metric.

use serde::{Deserialize, Serialize};

use crate::core::StructuralRecord;

/// Score weights per structural count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub methods: f64,
    pub properties: f64,
    pub cross_file_calls: f64,
    pub node_references: f64,
    pub connections: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            methods: 1.0,
            properties: 0.5,
            cross_file_calls: 1.5,
            node_references: 0.8,
            connections: 1.2,
        }
    }
}

/// Compute the complexity score of one successful record.
pub fn score(record: &StructuralRecord, weights: &Weights) -> f64 {
    record.methods.len() as f64 * weights.methods
        + record.properties.len() as f64 * weights.properties
        + record.cross_file_calls.len() as f64 * weights.cross_file_calls
        + record.node_references.len() as f64 * weights.node_references
        + record.connections.len() as f64 * weights.connections
}

/// Index of the item with the maximal key, first-wins on ties.
///
/// Comparison is strict greater-than, so when several items share the maximum
/// the earliest one in input order is selected. Ranking results must be
/// reproducible across runs, which makes this tie-break load-bearing.
pub fn rank_max<T, F>(items: &[T], mut key: F) -> Option<usize>
where
    F: FnMut(&T) -> f64,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, item) in items.iter().enumerate() {
        let k = key(item);
        match best {
            Some((_, max)) if k > max => best = Some((index, k)),
            Some(_) => {}
            None => best = Some((index, k)),
        }
    }
    best.map(|(index, _)| index)
}
