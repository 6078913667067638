//! gdlens - project-wide structural analysis for GDScript codebases.
//!
//! gdlens aggregates per-file structural records into architectural insight:
//! complexity rankings, a cross-reference graph, a pattern census (singleton,
//! observer, state machine, factory, component, MVC roles), heuristic issue
//! detection, and directory/naming statistics.
//!
//! Parsing is not done here. A [`core::FactExtractor`] implementation turns
//! one file into a [`core::StructuralRecord`]; the [`batch::BatchRunner`]
//! drives it over an ordered path list and assembles one consolidated
//! [`report::BatchResult`].
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use gdlens::config::{Config, ExtractOptions};
//! use gdlens::core::{FactExtractor, FileSet, StructuralRecord};
//! use gdlens::batch::BatchRunner;
//!
//! struct StubExtractor;
//!
//! impl FactExtractor for StubExtractor {
//!     fn extract(&self, path: &Path, _options: &ExtractOptions) -> StructuralRecord {
//!         StructuralRecord::new(path.to_string_lossy())
//!     }
//! }
//!
//! let config = Config::default();
//! let files = FileSet::scan(".", &config.exclude_patterns).unwrap();
//! let runner = BatchRunner::new(config);
//! let result = runner.run(files.files(), Arc::new(StubExtractor)).unwrap();
//! println!("analyzed {} scripts", result.summary.successful);
//! ```

pub mod analyzers;
pub mod batch;
pub mod config;
pub mod core;
pub mod output;
pub mod report;

pub use batch::{BatchContext, BatchOptions, BatchRunner};
pub use core::{FactExtractor, FileSet, StructuralRecord};
pub use report::{BatchResult, BatchStatus};
