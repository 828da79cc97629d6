//! Sample directory trees for demonstrations and tests.
//!
//! A [`FixtureTree`] is an explicit table of relative paths and contents.
//! [`FixtureTree::materialize`] writes it below a base directory, creating
//! intermediate directories as needed.
//!
//! # Example
//!
//! ```no_run
//! use dirdupes::fixture::FixtureTree;
//! use std::path::Path;
//!
//! // root/a.txt = "xyz", root/b.txt = "abc", root/foo/c.txt = "xyz",
//! // root/foo/d.txt = "123", root/foo/bar/e.txt = "abc"
//! FixtureTree::canonical().materialize(Path::new("root")).unwrap();
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while writing a fixture tree.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// A fixture path is absolute or climbs out of the base directory.
    #[error("Fixture path must be relative and stay inside the base: {0}")]
    InvalidPath(PathBuf),

    /// A directory could not be created.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that failed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A file could not be written.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        /// File that failed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Table of relative file paths and their contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureTree {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl FixtureTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The five-file demonstration tree: two pairs of duplicates and one
    /// unique file, spread over three directory levels.
    #[must_use]
    pub fn canonical() -> Self {
        Self::new()
            .with_file("a.txt", "xyz")
            .with_file("b.txt", "abc")
            .with_file("foo/c.txt", "xyz")
            .with_file("foo/d.txt", "123")
            .with_file("foo/bar/e.txt", "abc")
    }

    /// Add (or replace) a file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl AsRef<[u8]>) -> Self {
        self.files.insert(path.into(), content.as_ref().to_vec());
        self
    }

    /// Number of files in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the tree has no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate `(relative path, content)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[u8])> {
        self.files.iter().map(|(p, c)| (p.as_path(), c.as_slice()))
    }

    /// Write every file below `base`.
    ///
    /// Existing files at the same paths are overwritten. Returns the
    /// written paths, each formed by joining `base` with the relative path.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::InvalidPath`] before touching the disk if
    /// any path is absolute or contains `..`; otherwise the first I/O
    /// failure.
    pub fn materialize(&self, base: &Path) -> Result<Vec<PathBuf>, FixtureError> {
        if let Some(bad) = self.files.keys().find(|p| !is_contained(p)) {
            return Err(FixtureError::InvalidPath(bad.clone()));
        }

        let mut written = Vec::with_capacity(self.files.len());
        for (relative, content) in &self.files {
            let full_path = base.join(relative);

            if let Some(dir) = full_path.parent() {
                fs::create_dir_all(dir).map_err(|source| FixtureError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }

            fs::write(&full_path, content).map_err(|source| FixtureError::WriteFile {
                path: full_path.clone(),
                source,
            })?;
            log::debug!("Wrote fixture file {}", full_path.display());
            written.push(full_path);
        }

        log::info!("Created {} fixture files under {}", written.len(), base.display());
        Ok(written)
    }
}

/// Check that `path` is relative, non-empty and never climbs upward.
fn is_contained(path: &Path) -> bool {
    let mut saw_normal = false;
    for component in path.components() {
        match component {
            Component::Normal(_) => saw_normal = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    saw_normal
}
