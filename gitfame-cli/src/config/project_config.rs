//! Config file support
//!
//! Loads defaults from `.gitfame.toml` in the repository and from the user's
//! `~/.config/gitfame/config.toml`. The project file wins over the user file;
//! command-line flags win over both.
//!
//! # Configuration Format
//!
//! ```toml
//! # .gitfame.toml
//! revision = "main"
//! order_by = "commits"
//! format = "csv"
//! use_committer = false
//! workers = 8
//! extensions = [".rs", ".toml"]
//! exclude = ["vendor/*", "*.lock"]
//! ```

use crate::filters::FilterSpec;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the per-repository config file
pub const PROJECT_CONFIG_FILE: &str = ".gitfame.toml";

/// One configuration layer. Unset fields defer to lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FameConfig {
    #[serde(default)]
    pub revision: Option<String>,

    /// lines, commits or files
    #[serde(default)]
    pub order_by: Option<String>,

    /// tabular, csv, json or json-lines
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub use_committer: Option<bool>,

    #[serde(default)]
    pub workers: Option<usize>,

    /// Replacement language table (JSON)
    #[serde(default)]
    pub languages_file: Option<PathBuf>,

    #[serde(flatten)]
    pub filters: FilterSpec,
}

impl FameConfig {
    /// Merge another layer into this one (other takes priority)
    pub fn merge(&mut self, other: FameConfig) {
        if other.revision.is_some() {
            self.revision = other.revision;
        }
        if other.order_by.is_some() {
            self.order_by = other.order_by;
        }
        if other.format.is_some() {
            self.format = other.format;
        }
        if other.use_committer.is_some() {
            self.use_committer = other.use_committer;
        }
        if other.workers.is_some() {
            self.workers = other.workers;
        }
        if other.languages_file.is_some() {
            self.languages_file = other.languages_file;
        }
        if other.filters.extensions.is_some() {
            self.filters.extensions = other.filters.extensions;
        }
        if other.filters.languages.is_some() {
            self.filters.languages = other.filters.languages;
        }
        if other.filters.exclude.is_some() {
            self.filters.exclude = other.filters.exclude;
        }
        if other.filters.restrict_to.is_some() {
            self.filters.restrict_to = other.filters.restrict_to;
        }
    }
}

/// Get the user config file path
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("gitfame").join("config.toml"))
}

/// Load the user config, then the project config on top of it.
///
/// Missing files are skipped; unreadable or invalid ones are logged and
/// skipped.
pub fn load_config(repo_path: &Path) -> FameConfig {
    let mut config = FameConfig::default();

    if let Some(user_path) = user_config_path() {
        if let Some(user) = load_layer(&user_path) {
            config.merge(user);
        }
    }

    if let Some(project) = load_layer(&repo_path.join(PROJECT_CONFIG_FILE)) {
        config.merge(project);
    }

    config
}

fn load_layer(path: &Path) -> Option<FameConfig> {
    if !path.exists() {
        return None;
    }
    match load_toml_config(path) {
        Ok(config) => {
            debug!("Loaded config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            warn!("Failed to load {}: {}", path.display(), e);
            None
        }
    }
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<FameConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: FameConfig = toml::from_str(&content)?;
    Ok(config)
}
