//! Core data models for gitfame
//!
//! These models are shared between the attribution parsers, the aggregator
//! and the reporters.

use serde::{Deserialize, Serialize};

/// Per-author ownership statistics.
///
/// Field order is part of the output contract (JSON keys, table columns).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorStat {
    pub name: String,
    /// Lines currently attributed to this author
    pub lines: usize,
    /// Distinct commits owned by this author
    pub commits: usize,
    /// Distinct files this author is credited with
    pub files: usize,
}

impl AuthorStat {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// One commit's contribution to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributionEvent {
    /// Opaque commit token
    pub commit: String,
    /// Author the commit was associated with in this file
    pub author: String,
    /// Content lines attributed to the commit in this file
    pub lines: usize,
}

/// How a file's attribution was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributionStrategy {
    /// Parsed from `git blame --porcelain`
    Blame,
    /// File has no attributable lines; parsed from the latest log entry
    LogFallback,
}

/// Everything the aggregator needs to know about one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttribution {
    pub path: String,
    pub strategy: AttributionStrategy,
    /// Events in order of first association
    pub events: Vec<AttributionEvent>,
    /// Distinct authors credited with this file, in order of first credit
    pub authors: Vec<String>,
}
