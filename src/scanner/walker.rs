//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and capturing the full content of every regular file it contains.
//!
//! # Features
//!
//! - Depth-first traversal with children sorted by file name
//! - Symlinks are never followed and never read
//! - Devices, sockets and FIFOs are skipped without error
//! - Fail-fast or skip-and-report error handling via [`ErrorPolicy`]
//! - Optional parallel content reads on the rayon pool
//!
//! # Example
//!
//! ```no_run
//! use dirdupes::scanner::{ErrorPolicy, ScanConfig, Walker};
//! use std::path::Path;
//!
//! let config = ScanConfig::default().with_error_policy(ErrorPolicy::Skip);
//! let outcome = Walker::new(Path::new("/home/user/Downloads"), config)
//!     .scan()
//!     .unwrap();
//!
//! println!("{} files read", outcome.result.len());
//! for err in &outcome.skipped {
//!     eprintln!("Warning: {}", err);
//! }
//! ```

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use super::{ErrorPolicy, ScanConfig, ScanError, ScanOutcome, ScanResult};

/// Scan `root` with the default configuration (sequential, fail-fast).
///
/// # Errors
///
/// Returns the first [`ScanError`] encountered; no partial result is
/// produced.
///
/// # Example
///
/// ```no_run
/// use dirdupes::scanner::scan;
/// use std::path::Path;
///
/// let result = scan(Path::new("root")).unwrap();
/// println!("Captured {} files", result.len());
/// ```
pub fn scan(root: &Path) -> Result<ScanResult, ScanError> {
    Walker::new(root, ScanConfig::default())
        .scan()
        .map(|outcome| outcome.result)
}

/// Read the full content of a single file.
///
/// The file handle is dropped before this function returns, on success
/// and on error.
///
/// # Errors
///
/// Returns [`ScanError::Read`] if the file cannot be opened or read.
pub fn read_content(path: &Path) -> Result<Vec<u8>, ScanError> {
    log::trace!("Reading {}", path.display());
    fs::read(path).map_err(|source| read_error(path, source))
}

fn read_error(path: &Path, source: io::Error) -> ScanError {
    match source.kind() {
        ErrorKind::NotFound => {
            log::debug!("File vanished during scan: {}", path.display());
        }
        ErrorKind::PermissionDenied => {
            log::debug!("Permission denied: {}", path.display());
        }
        _ => {}
    }
    ScanError::Read {
        path: path.to_path_buf(),
        source,
    }
}

/// Directory walker that captures file contents.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Scan configuration
    config: ScanConfig,
}

impl Walker {
    /// Create a new walker for the given root.
    ///
    /// # Arguments
    ///
    /// * `root` - Root directory to scan
    /// * `config` - Scan configuration options
    #[must_use]
    pub fn new(root: &Path, config: ScanConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
        }
    }

    /// Walk the tree and read every regular file.
    ///
    /// # Errors
    ///
    /// Root problems ([`ScanError::NotFound`], [`ScanError::NotADirectory`])
    /// are always returned. Errors below the root are returned under
    /// [`ErrorPolicy::Abort`] and collected into [`ScanOutcome::skipped`]
    /// under [`ErrorPolicy::Skip`].
    pub fn scan(&self) -> Result<ScanOutcome, ScanError> {
        self.validate_root()?;

        log::info!("Scanning {}", self.root.display());

        let outcome = if self.config.parallel {
            self.scan_parallel()?
        } else {
            self.scan_sequential()?
        };

        log::info!(
            "Scan complete: {} files, {} bytes, {} skipped",
            outcome.result.len(),
            outcome.result.total_bytes(),
            outcome.skipped.len()
        );

        Ok(outcome)
    }

    /// Check that the root exists, is a directory and can be listed.
    ///
    /// An unreadable root is rejected here under either error policy.
    fn validate_root(&self) -> Result<(), ScanError> {
        let metadata = match fs::metadata(&self.root) {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ScanError::NotFound(self.root.clone()));
            }
            Err(source) => {
                return Err(ScanError::Walk {
                    path: self.root.clone(),
                    source,
                });
            }
        };

        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }

        fs::read_dir(&self.root).map_err(|source| ScanError::Walk {
            path: self.root.clone(),
            source,
        })?;
        Ok(())
    }

    /// Iterate regular-file paths below the root in sorted depth-first order.
    fn regular_files(&self) -> impl Iterator<Item = Result<PathBuf, ScanError>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    let file_type = entry.file_type();
                    if file_type.is_dir() {
                        return None;
                    }
                    if !file_type.is_file() {
                        log::trace!("Skipping non-regular entry: {}", entry.path().display());
                        return None;
                    }
                    Some(Ok(entry.into_path()))
                }
                Err(e) => Some(Err(self.walk_error(e))),
            })
    }

    fn scan_sequential(&self) -> Result<ScanOutcome, ScanError> {
        let mut outcome = ScanOutcome::default();

        for entry in self.regular_files() {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    self.handle_error(e, &mut outcome.skipped)?;
                    continue;
                }
            };

            match read_content(&path) {
                Ok(content) => outcome.result.insert(path, content),
                Err(e) => self.handle_error(e, &mut outcome.skipped)?,
            }
        }

        Ok(outcome)
    }

    fn scan_parallel(&self) -> Result<ScanOutcome, ScanError> {
        let mut skipped = Vec::new();
        let mut paths = Vec::new();
        for entry in self.regular_files() {
            match entry {
                Ok(path) => paths.push(path),
                Err(e) => self.handle_error(e, &mut skipped)?,
            }
        }

        log::debug!("Reading {} files in parallel", paths.len());

        let result = match self.config.on_error {
            ErrorPolicy::Abort => paths
                .into_par_iter()
                .map(|path| read_content(&path).map(|content| (path, content)))
                .collect::<Result<Vec<_>, ScanError>>()?
                .into_iter()
                .collect(),
            ErrorPolicy::Skip => {
                let reads: Vec<_> = paths
                    .into_par_iter()
                    .map(|path| read_content(&path).map(|content| (path, content)))
                    .collect();

                let mut result = ScanResult::default();
                for read in reads {
                    match read {
                        Ok((path, content)) => result.insert(path, content),
                        Err(e) => self.handle_error(e, &mut skipped)?,
                    }
                }
                result
            }
        };

        Ok(ScanOutcome { result, skipped })
    }

    /// Apply the error policy to an error found below the root.
    ///
    /// A walk error on the root itself is always returned.
    fn handle_error(&self, error: ScanError, skipped: &mut Vec<ScanError>) -> Result<(), ScanError> {
        if matches!(error, ScanError::Walk { ref path, .. } if *path == self.root) {
            return Err(error);
        }
        match self.config.on_error {
            ErrorPolicy::Abort => {
                log::debug!("Aborting scan: {}", error);
                Err(error)
            }
            ErrorPolicy::Skip => {
                log::warn!("Skipping: {}", error);
                skipped.push(error);
                Ok(())
            }
        }
    }

    /// Convert a walkdir error into a traversal error.
    fn walk_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        let source = error
            .into_io_error()
            .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
        ScanError::Walk { path, source }
    }
}
