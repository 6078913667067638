//! Cross-reference graph builder.
//!
//! Derives a directed "loads/instantiates" graph between script paths from
//! per-file call records. Duplicate handling is asymmetric on purpose: the
//! forward list keeps every occurrence (a file that loads the same target
//! three times records three entries) while the reverse list is deduplicated.

use std::collections::{BTreeMap, HashMap};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::core::{CallKind, StructuralRecord};

/// Edges attached to one path in the reference graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct XrefEntry {
    /// Outgoing references in call order, duplicates kept.
    pub references_to: Vec<String>,
    /// Incoming references, deduplicated, first-seen order.
    pub referenced_by: Vec<String>,
}

/// The project-wide cross-reference graph.
///
/// Keyed by path; entries are created lazily for any path seen as a source or
/// a target, so a dangling target (never analyzed) still gets a node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct XrefGraph {
    entries: BTreeMap<String, XrefEntry>,
}

impl XrefGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one successful record into the graph.
    ///
    /// Only `preload/load` and `instance_creation` calls contribute edges.
    pub fn add_record(&mut self, record: &StructuralRecord) {
        for call in &record.cross_file_calls {
            if !matches!(call.kind, CallKind::Load | CallKind::InstanceCreation) {
                continue;
            }
            self.entries
                .entry(record.path.clone())
                .or_default()
                .references_to
                .push(call.target.clone());

            let target = self.entries.entry(call.target.clone()).or_default();
            if !target.referenced_by.contains(&record.path) {
                target.referenced_by.push(record.path.clone());
            }
        }
    }

    /// Look up the entry for a path.
    pub fn get(&self, path: &str) -> Option<&XrefEntry> {
        self.entries.get(path)
    }

    /// Number of paths with at least one edge.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &XrefEntry)> {
        self.entries.iter()
    }

    /// Total forward references, duplicates included.
    pub fn reference_count(&self) -> usize {
        self.entries.values().map(|e| e.references_to.len()).sum()
    }

    /// Dependency cycles among the recorded references (Tarjan SCC).
    ///
    /// Edges are deduplicated before the SCC pass; each cycle and the overall
    /// list are sorted so output is deterministic.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut graph: DiGraph<&str, ()> = DiGraph::new();
        let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();

        for path in self.entries.keys() {
            let idx = graph.add_node(path.as_str());
            nodes.insert(path.as_str(), idx);
        }
        for (path, entry) in &self.entries {
            let from = nodes[path.as_str()];
            let mut seen: Vec<&str> = Vec::new();
            for target in &entry.references_to {
                if seen.contains(&target.as_str()) {
                    continue;
                }
                seen.push(target.as_str());
                if let Some(&to) = nodes.get(target.as_str()) {
                    graph.add_edge(from, to, ());
                }
            }
        }

        let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| {
                let mut names: Vec<String> =
                    scc.iter().map(|&idx| graph[idx].to_string()).collect();
                names.sort();
                names
            })
            .collect();
        cycles.sort();
        cycles
    }
}
