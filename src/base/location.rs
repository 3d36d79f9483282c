//! Source locations.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A position in a source file: `(file, line, column)`.
///
/// File paths are expected to be canonical (absolute, symlink-resolved) by
/// the time they reach the graph; the index provider owns canonicalization.
/// Locations are totally ordered lexicographically, which gives report
/// emission its stable ordering.
///
/// The file path is shared: a typical graph holds roughly ten references
/// per declaration, all pointing into the same handful of files.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Location {
    /// Canonical path of the containing file.
    pub file: Arc<PathBuf>,
    /// 1-indexed line.
    pub line: u32,
    /// 1-indexed column.
    pub column: u32,
}

impl Location {
    /// Create a new location.
    pub fn new(file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        Self {
            file: Arc::new(file.into()),
            line,
            column,
        }
    }

    /// Create a location sharing an already-interned file path.
    pub fn with_file(file: Arc<PathBuf>, line: u32, column: u32) -> Self {
        Self { file, line, column }
    }

    /// The containing file as a borrowed path.
    pub fn path(&self) -> &Path {
        self.file.as_path()
    }

    /// Whether this location and `other` are in the same file.
    pub fn same_file(&self, other: &Location) -> bool {
        self.file == other.file
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}
