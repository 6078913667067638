//! Architectural pattern census and MVC-role classification.
//!
//! Per-record classifiers are independent pure predicates; a script may match
//! several patterns at once. The MVC-role chain is the opposite: an ordered,
//! mutually-exclusive rule list where the first match wins, so its order must
//! not be changed.

use serde::{Deserialize, Serialize};

use crate::core::{CallKind, DeclScope, StructuralRecord};

/// Architectural patterns detected per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Singleton,
    Observer,
    StateMachine,
    Factory,
    Component,
}

impl Pattern {
    pub const ALL: [Pattern; 5] = [
        Pattern::Singleton,
        Pattern::Observer,
        Pattern::StateMachine,
        Pattern::Factory,
        Pattern::Component,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Singleton => "singleton",
            Pattern::Observer => "observer",
            Pattern::StateMachine => "state_machine",
            Pattern::Factory => "factory",
            Pattern::Component => "component",
        }
    }

    /// Whether a record matches this pattern.
    pub fn matches(self, record: &StructuralRecord) -> bool {
        match self {
            Pattern::Singleton => is_singleton(record),
            Pattern::Observer => is_observer(record),
            Pattern::StateMachine => is_state_machine(record),
            Pattern::Factory => is_factory(record),
            Pattern::Component => is_component(record),
        }
    }
}

fn is_singleton(record: &StructuralRecord) -> bool {
    record.properties.iter().any(|p| {
        p.scope == DeclScope::Global && p.name.to_lowercase().contains("instance")
    }) || record
        .methods
        .iter()
        .any(|m| m.name.to_lowercase().contains("get_instance"))
}

fn is_observer(record: &StructuralRecord) -> bool {
    record.signals.len() > 2
}

fn is_state_machine(record: &StructuralRecord) -> bool {
    let has_state_enum = record
        .constants
        .iter()
        .any(|c| c.is_enum && c.name.to_lowercase().contains("state"));
    let has_state_property = record
        .properties
        .iter()
        .any(|p| p.name.to_lowercase().contains("state"));
    has_state_enum && has_state_property
}

fn is_factory(record: &StructuralRecord) -> bool {
    record
        .cross_file_calls
        .iter()
        .filter(|c| c.kind == CallKind::InstanceCreation)
        .count()
        > 2
}

fn is_component(record: &StructuralRecord) -> bool {
    record.properties.iter().filter(|p| p.exported).count() > 2
}

/// One row of the pattern census.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternCensusEntry {
    pub name: String,
    pub count: usize,
    pub percentage: f64,
}

/// Running pattern counters, converted to a census once totals are known.
#[derive(Debug, Default)]
pub struct PatternCensus {
    counts: [usize; Pattern::ALL.len()],
}

impl PatternCensus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally one successful record against every pattern.
    pub fn observe(&mut self, record: &StructuralRecord) {
        for (slot, pattern) in self.counts.iter_mut().zip(Pattern::ALL) {
            if pattern.matches(record) {
                *slot += 1;
            }
        }
    }

    /// Convert counters to census rows.
    ///
    /// `total_records` is the full batch size, failed extractions included,
    /// even though only successes are ever observed. The mixed denominator
    /// matches the long-standing observable output and is kept as-is.
    pub fn finish(&self, total_records: usize) -> Vec<PatternCensusEntry> {
        Pattern::ALL
            .iter()
            .zip(self.counts)
            .filter(|(_, count)| *count > 0)
            .map(|(pattern, count)| PatternCensusEntry {
                name: pattern.name().to_string(),
                count,
                percentage: count as f64 / total_records as f64 * 100.0,
            })
            .collect()
    }
}

/// MVC-ish role a script plays, guessed from its filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Model,
    View,
    Controller,
}

/// Ordered first-match-wins rule chain. Reordering changes results for files
/// whose names match several substrings, so the order is part of the contract.
const ROLE_RULES: &[(&[&str], Role)] = &[
    (&["model", "data"], Role::Model),
    (&["view", "ui", "gui"], Role::View),
    (&["controller", "manager"], Role::Controller),
];

/// Classify a script path into an MVC role by filename substring.
pub fn classify_role(path: &str) -> Option<Role> {
    let name = path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(path)
        .to_lowercase();
    for (needles, role) in ROLE_RULES {
        if needles.iter().any(|needle| name.contains(needle)) {
            return Some(*role);
        }
    }
    None
}

/// Batch-wide role and pattern counters.
///
/// Role counts are exclusive (one role per file at most); the pattern counts
/// are independent of the roles and of each other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchitectureSummary {
    pub models: usize,
    pub views: usize,
    pub controllers: usize,
    pub singletons: usize,
    pub factories: usize,
    pub observers: usize,
    pub components: usize,
}

impl ArchitectureSummary {
    /// Tally one successful record.
    pub fn observe(&mut self, record: &StructuralRecord) {
        match classify_role(&record.path) {
            Some(Role::Model) => self.models += 1,
            Some(Role::View) => self.views += 1,
            Some(Role::Controller) => self.controllers += 1,
            None => {}
        }
        if is_singleton(record) {
            self.singletons += 1;
        }
        if is_factory(record) {
            self.factories += 1;
        }
        if is_observer(record) {
            self.observers += 1;
        }
        if is_component(record) {
            self.components += 1;
        }
    }
}
