//! Directory-shape and naming-convention statistics.
//!
//! A pure function of the path list plus on-disk byte sizes; extraction
//! success is irrelevant here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Filesystem-shape statistics for one batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryStats {
    /// File count per containing directory.
    pub files_per_directory: BTreeMap<String, usize>,
    /// Maximum separator count over all directory portions.
    pub max_depth: usize,
    /// Byte-size distribution over the batch.
    pub sizes: SizeDistribution,
    /// Naming-convention tallies over file stems.
    pub naming: NamingTally,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeDistribution {
    pub total: u64,
    pub average: u64,
    pub median: u64,
    pub min: u64,
    pub max: u64,
}

impl SizeDistribution {
    fn from_sizes(mut sizes: Vec<u64>) -> Self {
        if sizes.is_empty() {
            return Self::default();
        }
        sizes.sort_unstable();
        let total: u64 = sizes.iter().sum();
        // Integer average with the divisor floored at 1; median takes the
        // element at n/2 without averaging the middle pair for even n.
        Self {
            total,
            average: total / (sizes.len() as u64).max(1),
            median: sizes[sizes.len() / 2],
            min: sizes[0],
            max: sizes[sizes.len() - 1],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingTally {
    pub snake: usize,
    pub camel: usize,
    pub pascal: usize,
    pub mixed: usize,
}

/// Naming style of a file stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStyle {
    Snake,
    Camel,
    Pascal,
    Mixed,
}

static SNAKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(_[a-z0-9]+)+$").expect("valid regex"));
static CAMEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9]*[A-Z][A-Za-z0-9]*$").expect("valid regex"));
static PASCAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*[a-z][A-Za-z0-9]*$").expect("valid regex"));

/// Classify a file stem with an ordered first-match-wins chain.
///
/// The chain is heuristic and intentionally fallthrough-shaped: names that
/// satisfy none of the first three rules (including all-lowercase single
/// words like "player") land in `Mixed`.
pub fn classify_name(stem: &str) -> NamingStyle {
    if SNAKE.is_match(stem) {
        NamingStyle::Snake
    } else if CAMEL.is_match(stem) {
        NamingStyle::Camel
    } else if PASCAL.is_match(stem) {
        NamingStyle::Pascal
    } else {
        NamingStyle::Mixed
    }
}

/// Derive directory statistics from the batch's path list.
///
/// Unreadable files contribute a size of zero so the distribution always
/// covers the same n as the batch.
pub fn analyze(paths: &[PathBuf]) -> DirectoryStats {
    let mut files_per_directory: BTreeMap<String, usize> = BTreeMap::new();
    let mut max_depth = 0;
    let mut naming = NamingTally::default();
    let mut sizes = Vec::with_capacity(paths.len());

    for path in paths {
        let dir = directory_portion(path);
        max_depth = max_depth.max(depth_of(&dir));
        *files_per_directory.entry(dir).or_insert(0) += 1;

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        match classify_name(&stem) {
            NamingStyle::Snake => naming.snake += 1,
            NamingStyle::Camel => naming.camel += 1,
            NamingStyle::Pascal => naming.pascal += 1,
            NamingStyle::Mixed => naming.mixed += 1,
        }

        sizes.push(std::fs::metadata(path).map(|m| m.len()).unwrap_or(0));
    }

    DirectoryStats {
        files_per_directory,
        max_depth,
        sizes: SizeDistribution::from_sizes(sizes),
        naming,
    }
}

fn directory_portion(path: &Path) -> String {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            parent.to_string_lossy().into_owned()
        }
        _ => ".".to_string(),
    }
}

/// Depth is the number of path separators in the directory portion.
fn depth_of(dir: &str) -> usize {
    dir.chars().filter(|c| std::path::is_separator(*c)).count()
}
