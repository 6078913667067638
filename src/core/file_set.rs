//! File set for collecting scripts to analyze.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use super::Result;

/// An ordered set of script paths handed to the batch orchestrator.
///
/// Input order is significant downstream (ranking tie-breaks, reference-graph
/// discovery order), so the set preserves whatever order it was built with.
/// [`FileSet::scan`] sorts its results for deterministic runs.
#[derive(Debug, Clone)]
pub struct FileSet {
    /// Root directory the paths were gathered under.
    root: PathBuf,
    /// All files in the set.
    files: Vec<PathBuf>,
}

impl FileSet {
    /// Build a file set from an explicit, pre-filtered path list.
    ///
    /// This is the contract boundary with an external directory scanner:
    /// include patterns, recursion, and exclude lists are assumed resolved.
    pub fn from_paths(root: impl Into<PathBuf>, files: Vec<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files,
        }
    }

    /// Walk `path` and collect GDScript files, respecting .gitignore.
    ///
    /// The walker is iterative and symlink-cycle safe (the `ignore` crate does
    /// not follow symlinks by default). Results are sorted so repeated runs
    /// over the same tree produce identical batches.
    pub fn scan(path: impl AsRef<Path>, exclude_patterns: &[String]) -> Result<Self> {
        let root = path.as_ref().canonicalize()?;
        let mut files = Vec::new();

        let mut exclude = globset::GlobSetBuilder::new();
        for pattern in exclude_patterns {
            if let Ok(glob) = globset::Glob::new(pattern) {
                exclude.add(glob);
            }
        }
        let exclude = exclude
            .build()
            .map_err(|e| super::Error::config(e.to_string()))?;

        let walker = WalkBuilder::new(&root)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .build();

        for entry in walker.flatten() {
            let path = entry.path();
            if path.is_dir() || !is_gdscript(path) {
                continue;
            }
            if exclude.is_match(path) {
                continue;
            }
            files.push(path.to_path_buf());
        }

        files.sort();

        Ok(Self { root, files })
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get all files in the set.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Get the number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the file set is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over files.
    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter()
    }

    /// Get relative path from root.
    pub fn relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// Whether a path looks like a GDScript source file.
fn is_gdscript(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("gd")
}
