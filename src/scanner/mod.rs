//! Scanner module for directory traversal and content capture.
//!
//! This module provides functionality for:
//! - Sorted, single-threaded directory walking using walkdir
//! - Reading the full content of every regular file
//! - Optional parallel content reads on the rayon pool
//! - Unicode path normalization for display
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and content capture
//! - [`path_utils`]: Path rendering helpers
//!
//! # Example
//!
//! ```no_run
//! use dirdupes::scanner::{ScanConfig, Walker};
//! use std::path::Path;
//!
//! let outcome = Walker::new(Path::new("root"), ScanConfig::default())
//!     .scan()
//!     .unwrap();
//!
//! for (path, content) in outcome.result.iter() {
//!     println!("{}: {} bytes", path.display(), content.len());
//! }
//! ```

pub mod path_utils;
pub mod walker;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

// Re-export main types
pub use walker::{read_content, scan, Walker};

/// Mapping from file path to file content for one traversal.
///
/// Keys are paths as produced by joining the scan root with each relative
/// segment. Iteration is in ascending path order. There is never an entry
/// for a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl ScanResult {
    /// Record the content read for `path`.
    pub(crate) fn insert(&mut self, path: PathBuf, content: Vec<u8>) {
        self.files.insert(path, content);
    }

    /// Number of files captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if no files were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Content captured for `path`, if it was scanned.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Check if `path` was captured.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// Iterate `(path, content)` pairs in ascending path order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[u8])> {
        self.files
            .iter()
            .map(|(path, content)| (path.as_path(), content.as_slice()))
    }

    /// Iterate captured paths in ascending order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    /// Sum of all captured content lengths.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.files.values().map(|c| c.len() as u64).sum()
    }
}

impl FromIterator<(PathBuf, Vec<u8>)> for ScanResult {
    fn from_iter<I: IntoIterator<Item = (PathBuf, Vec<u8>)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

/// What to do when a directory or file cannot be read mid-scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Abort the scan on the first error; no partial result.
    #[default]
    Abort,
    /// Skip the unreadable entry and report it in [`ScanOutcome::skipped`].
    Skip,
}

/// Configuration for a scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanConfig {
    /// Error policy applied uniformly to every entry below the root.
    pub on_error: ErrorPolicy,

    /// Read file contents on the rayon pool after the walk.
    pub parallel: bool,
}

impl ScanConfig {
    /// Set the error policy.
    #[must_use]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.on_error = policy;
        self
    }

    /// Enable or disable parallel content reads.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Result of a completed scan.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Every successfully read regular file.
    pub result: ScanResult,
    /// Entries skipped under [`ErrorPolicy::Skip`]. Always empty under
    /// [`ErrorPolicy::Abort`].
    pub skipped: Vec<ScanError>,
}

/// Broad classification of a [`ScanError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanErrorKind {
    /// The root or a directory below it could not be walked.
    Traversal,
    /// A discovered file could not be read.
    Read,
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The scan root does not exist.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The scan root is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A directory could not be listed during the walk.
    #[error("Cannot traverse {path}: {source}")]
    Walk {
        /// Directory where the walk failed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A regular file could not be read.
    #[error("Cannot read {path}: {source}")]
    Read {
        /// File that failed to read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Classify this error as a traversal or read failure.
    #[must_use]
    pub fn kind(&self) -> ScanErrorKind {
        match self {
            Self::NotFound(_) | Self::NotADirectory(_) | Self::Walk { .. } => {
                ScanErrorKind::Traversal
            }
            Self::Read { .. } => ScanErrorKind::Read,
        }
    }

    /// Path the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path) | Self::NotADirectory(path) => path,
            Self::Walk { path, .. } | Self::Read { path, .. } => path,
        }
    }
}
