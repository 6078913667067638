//! Heuristic issue battery over the whole batch.
//!
//! Rules are independent: any subset of them may fire. Counting runs over
//! successful records, while the naming ratio divides by the full batch size.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::StructuralRecord;

/// Issue battery thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Ratio of unnamed scripts above which the naming issue fires (strict).
    pub unnamed_ratio: f64,
    /// Method count above which a script counts as overly complex (strict).
    pub max_methods: usize,
    /// Cross-file call count above which a script counts as coupled (strict).
    pub max_cross_file_calls: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            unnamed_ratio: 0.3,
            max_methods: 15,
            max_cross_file_calls: 8,
        }
    }
}

/// Category of a detected issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Naming,
    Complexity,
    Coupling,
}

/// Severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A systemic problem detected across the batch.
///
/// Messages embed the literal offending counts so a report reader (or a test)
/// can see the magnitude, not just the flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
}

/// Evaluate the threshold rules once over all records.
///
/// `records` is the full batch, failed extractions included: failures count
/// toward the naming denominator but are excluded from every tally.
pub fn identify(records: &[StructuralRecord], thresholds: &Thresholds) -> Vec<Issue> {
    let total = records.len();
    let successes = || records.iter().filter(|r| r.is_ok());
    let mut issues = Vec::new();

    let unnamed = successes().filter(|r| r.is_unnamed()).count();
    if unnamed as f64 > thresholds.unnamed_ratio * total as f64 {
        issues.push(Issue {
            kind: IssueKind::Naming,
            severity: Severity::Medium,
            message: format!(
                "{unnamed} of {total} scripts have no class_name declaration"
            ),
        });
    }

    let heavy = successes()
        .filter(|r| r.methods.len() > thresholds.max_methods)
        .count();
    if heavy > 0 {
        issues.push(Issue {
            kind: IssueKind::Complexity,
            severity: Severity::High,
            message: format!(
                "{heavy} scripts define more than {} methods",
                thresholds.max_methods
            ),
        });
    }

    let coupled = successes()
        .filter(|r| r.cross_file_calls.len() > thresholds.max_cross_file_calls)
        .count();
    if coupled > 0 {
        issues.push(Issue {
            kind: IssueKind::Coupling,
            severity: Severity::Medium,
            message: format!(
                "{coupled} scripts make more than {} cross-file calls",
                thresholds.max_cross_file_calls
            ),
        });
    }

    for issue in &issues {
        warn!(kind = ?issue.kind, severity = ?issue.severity, "{}", issue.message);
    }

    issues
}
