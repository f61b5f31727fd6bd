//! Configuration module for gitfame
//!
//! This module handles:
//! - Project-level configuration (.gitfame.toml)
//! - User-level configuration (~/.config/gitfame/config.toml)
//! - Resolving the merged layers into validated [`Settings`]

mod project_config;

pub use project_config::{load_config, user_config_path, FameConfig, PROJECT_CONFIG_FILE};

use crate::error::FameResult;
use crate::filters::FilterSpec;
use crate::reporters::OutputFormat;
use crate::stats::OrderBy;
use std::path::PathBuf;

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub repository: PathBuf,
    pub revision: String,
    pub use_committer: bool,
    pub order_by: OrderBy,
    pub format: OutputFormat,
    pub workers: Option<usize>,
    pub languages_file: Option<PathBuf>,
    pub filters: FilterSpec,
}

impl Settings {
    /// Apply defaults and validate the sort key and output format.
    pub fn resolve(repository: PathBuf, config: FameConfig) -> FameResult<Self> {
        let order_by = match config.order_by.as_deref() {
            Some(s) => s.parse()?,
            None => OrderBy::default(),
        };
        let format = match config.format.as_deref() {
            Some(s) => s.parse()?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            repository,
            revision: config.revision.unwrap_or_else(|| "HEAD".to_string()),
            use_committer: config.use_committer.unwrap_or(false),
            order_by,
            format,
            workers: config.workers,
            languages_file: config.languages_file,
            filters: config.filters,
        })
    }
}
