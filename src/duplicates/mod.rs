//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Partitioning scanned paths by exact content equality
//! - Report ordering, filtering and summary statistics

pub mod groups;

pub use groups::{group, DuplicateGroup, GroupOrder, Report, ReportSummary};
