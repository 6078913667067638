//! Configuration loading and management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analyzers::complexity::Weights;
use crate::analyzers::issues::Thresholds;
use crate::batch::BatchOptions;
use crate::core::{Error, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Exclude patterns (glob).
    #[serde(rename = "exclude")]
    pub exclude_patterns: Vec<String>,
    /// Which fact families the extractor should populate.
    pub extract: ExtractOptions,
    /// Complexity score weights.
    pub complexity: Weights,
    /// Issue battery thresholds.
    pub issues: Thresholds,
    /// Batch orchestration options.
    pub batch: BatchOptions,
}

impl Config {
    /// Load configuration from an explicit file path.
    ///
    /// Errors if the file does not exist. Use this for explicit config flags
    /// in an embedding front-end.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let raw = std::fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Load configuration from a directory, looking for `gdlens.toml`.
    ///
    /// A missing file is silently skipped (defaults are used).
    pub fn load_default(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join("gdlens.toml");
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Named flags selecting which structural facts the extractor populates.
///
/// Every flag defaults to disabled when absent, so a partial config section
/// can never produce an invalid option set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    pub class_name: bool,
    pub inheritance: bool,
    pub methods: bool,
    pub properties: bool,
    pub constants: bool,
    pub signals: bool,
    pub groups: bool,
    pub cross_file_calls: bool,
    pub node_tree: bool,
    pub connections: bool,
    pub external_resources: bool,
    pub object_method_calls: bool,
    pub builtin_overrides: bool,
    pub usage_example: bool,
}

impl ExtractOptions {
    /// Enable every fact family.
    pub fn all() -> Self {
        Self {
            class_name: true,
            inheritance: true,
            methods: true,
            properties: true,
            constants: true,
            signals: true,
            groups: true,
            cross_file_calls: true,
            node_tree: true,
            connections: true,
            external_resources: true,
            object_method_calls: true,
            builtin_overrides: true,
            usage_example: true,
        }
    }
}
