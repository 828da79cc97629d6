//! Content grouping and report shaping.
//!
//! # Overview
//!
//! [`group`] partitions the paths of a [`ScanResult`] by exact content
//! equality. Each distinct content value becomes one [`DuplicateGroup`]
//! holding the content and every path that carries it. Groups with a
//! single path are kept: they are valid output meaning "no duplicates for
//! this content".
//!
//! ## Indexing
//!
//! Contents are indexed by their BLAKE3 digest so that each file is
//! compared against a handful of candidates instead of every group. The
//! digest only narrows the search; a path joins a group only when its
//! bytes are identical to the group's content, so a digest collision can
//! never merge different contents.
//!
//! ## Ordering
//!
//! A [`ScanResult`] iterates in ascending path order, so paths inside a
//! group are ascending and groups appear in order of their smallest path.
//! [`Report::sort_by`] reorders groups explicitly.
//!
//! # Example
//!
//! ```
//! use dirdupes::duplicates::group;
//! use dirdupes::scanner::ScanResult;
//! use std::path::PathBuf;
//!
//! let scan: ScanResult = [
//!     (PathBuf::from("root/a.txt"), b"xyz".to_vec()),
//!     (PathBuf::from("root/b.txt"), b"abc".to_vec()),
//!     (PathBuf::from("root/foo/c.txt"), b"xyz".to_vec()),
//! ]
//! .into_iter()
//! .collect();
//!
//! let report = group(&scan);
//!
//! assert_eq!(report.len(), 2);
//! assert_eq!(report.to_rows()[0], vec!["xyz", "root/a.txt", "root/foo/c.txt"]);
//! assert_eq!(report.to_rows()[1], vec!["abc", "root/b.txt"]);
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::path::{Path, PathBuf};

use bytesize::ByteSize;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::scanner::path_utils::display_path;
use crate::scanner::ScanResult;

/// One distinct content value and every path holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// Exact file content shared by every path in this group
    pub content: Vec<u8>,
    /// Paths holding this content, ascending
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Create a new group.
    ///
    /// # Arguments
    ///
    /// * `content` - Shared file content
    /// * `paths` - Paths holding the content
    #[must_use]
    pub fn new(content: Vec<u8>, paths: Vec<PathBuf>) -> Self {
        Self { content, paths }
    }

    /// Number of paths in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group has no paths.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Check if two or more paths share this content.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        self.paths.len() > 1
    }

    /// Number of redundant copies (total - 1 original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    /// Content length in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Bytes taken up by the redundant copies.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size() * self.duplicate_count() as u64
    }

    /// Content as text, replacing invalid UTF-8.
    #[must_use]
    pub fn content_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    /// Check if `path` belongs to this group.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// Render as a row: the content followed by every path.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        std::iter::once(self.content_str().into_owned())
            .chain(self.paths.iter().map(|p| display_path(p)))
            .collect()
    }
}

/// Order in which a [`Report`] lists its groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GroupOrder {
    /// By smallest path, ascending
    #[default]
    Path,
    /// By content bytes, ascending
    Content,
    /// By number of paths, largest first
    Count,
}

/// All groups derived from one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Groups in report order
    pub groups: Vec<DuplicateGroup>,
}

impl Report {
    /// Number of groups (distinct contents).
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if the report has no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate groups in report order.
    pub fn iter(&self) -> std::slice::Iter<'_, DuplicateGroup> {
        self.groups.iter()
    }

    /// Check if any group holds two or more paths.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.groups.iter().any(DuplicateGroup::is_duplicate)
    }

    /// Find the group containing `path`.
    #[must_use]
    pub fn group_of(&self, path: &Path) -> Option<&DuplicateGroup> {
        self.groups.iter().find(|g| g.contains(path))
    }

    /// Reorder groups. Paths within a group keep their order.
    pub fn sort_by(&mut self, order: GroupOrder) {
        match order {
            GroupOrder::Path => self.groups.sort_by(|a, b| a.paths.first().cmp(&b.paths.first())),
            GroupOrder::Content => self.groups.sort_by(|a, b| a.content.cmp(&b.content)),
            GroupOrder::Count => self.groups.sort_by(|a, b| {
                b.len()
                    .cmp(&a.len())
                    .then_with(|| a.paths.first().cmp(&b.paths.first()))
            }),
        }
    }

    /// Drop singleton groups, keeping only actual duplicates.
    #[must_use]
    pub fn duplicates_only(self) -> Self {
        Self {
            groups: self
                .groups
                .into_iter()
                .filter(DuplicateGroup::is_duplicate)
                .collect(),
        }
    }

    /// Order-independent form: content mapped to its sorted paths.
    ///
    /// Two reports over the same scan compare equal in this form however
    /// their groups and paths are ordered.
    #[must_use]
    pub fn normalized(&self) -> BTreeMap<Vec<u8>, Vec<PathBuf>> {
        self.groups
            .iter()
            .map(|g| {
                let mut paths = g.paths.clone();
                paths.sort();
                (g.content.clone(), paths)
            })
            .collect()
    }

    /// Render every group as a `[content, path...]` row.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.groups.iter().map(DuplicateGroup::to_row).collect()
    }

    /// Compute summary statistics.
    #[must_use]
    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary {
            distinct_contents: self.groups.len(),
            ..ReportSummary::default()
        };

        for g in &self.groups {
            summary.total_files += g.len();
            summary.total_bytes += g.size() * g.len() as u64;
            if g.is_duplicate() {
                summary.duplicate_groups += 1;
                summary.duplicate_files += g.duplicate_count();
                summary.reclaimable_bytes += g.wasted_space();
            }
        }
        summary
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a DuplicateGroup;
    type IntoIter = std::slice::Iter<'a, DuplicateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Summary statistics for a [`Report`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    /// Files scanned
    pub total_files: usize,
    /// Bytes across all scanned files
    pub total_bytes: u64,
    /// Number of distinct content values (groups)
    pub distinct_contents: usize,
    /// Groups holding two or more paths
    pub duplicate_groups: usize,
    /// Redundant copies (excluding one original per group)
    pub duplicate_files: usize,
    /// Bytes that removing the redundant copies would free
    pub reclaimable_bytes: u64,
}

impl ReportSummary {
    /// Format reclaimable space as human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize::b(self.reclaimable_bytes).to_string()
    }

    /// Format total size as human-readable string.
    #[must_use]
    pub fn total_bytes_display(&self) -> String {
        ByteSize::b(self.total_bytes).to_string()
    }
}

/// Partition the paths of a scan by exact content equality.
///
/// This is a pure, total function: the empty scan yields an empty report
/// and a scan of all-distinct contents yields only singleton groups.
///
/// # Performance
///
/// - Time complexity: O(total bytes) for digesting, plus one byte
///   comparison per path against its matching group
/// - Space complexity: one copy of each distinct content
#[must_use]
pub fn group(scan: &ScanResult) -> Report {
    group_by_key(scan, |content| *blake3::hash(content).as_bytes())
}

/// Grouping with a pluggable index key.
///
/// `key` narrows the candidate groups for a content; membership is always
/// decided by full byte equality.
fn group_by_key<K, F>(scan: &ScanResult, key: F) -> Report
where
    K: Hash + Eq,
    F: Fn(&[u8]) -> K,
{
    let mut index: HashMap<K, Vec<usize>> = HashMap::new();
    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut collisions = 0usize;

    for (path, content) in scan.iter() {
        let bucket = index.entry(key(content)).or_default();

        let existing = bucket
            .iter()
            .copied()
            .find(|&i| groups[i].content.as_slice() == content);

        match existing {
            Some(i) => groups[i].paths.push(path.to_path_buf()),
            None => {
                if !bucket.is_empty() {
                    collisions += 1;
                    log::debug!("Index key collision for {}", path.display());
                }
                bucket.push(groups.len());
                groups.push(DuplicateGroup::new(
                    content.to_vec(),
                    vec![path.to_path_buf()],
                ));
            }
        }
    }

    let report = Report { groups };
    log::debug!(
        "Grouped {} files into {} distinct contents ({} key collisions)",
        scan.len(),
        report.len(),
        collisions
    );
    report
}
