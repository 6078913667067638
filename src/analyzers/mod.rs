//! Aggregation components of the analysis engine.

pub mod complexity;
pub mod issues;
pub mod layout;
pub mod patterns;
pub mod xref;
