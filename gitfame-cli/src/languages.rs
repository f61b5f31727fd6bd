//! Language registry
//!
//! Maps language names to their file extensions. The default table is
//! embedded in the binary; `--languages-file` can point at a replacement with
//! the same JSON layout.
//!
//! Loading never fails: an unreadable or malformed table is logged and
//! yields an empty registry, which makes the language filter fail open.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

const EMBEDDED_TABLE: &str = include_str!("../configs/language_extensions.json");

/// A language and the extensions (with leading `.`) that identify it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    #[serde(default)]
    pub extensions: Vec<String>,
}

impl LanguageDefinition {
    pub fn has_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }
}

/// Read-only table of known languages
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    languages: Vec<LanguageDefinition>,
}

impl LanguageRegistry {
    pub fn new(languages: Vec<LanguageDefinition>) -> Self {
        Self { languages }
    }

    /// Load the table from `path`, or the embedded table when `path` is None.
    pub fn load(path: Option<&Path>) -> Self {
        let loaded = match path {
            Some(p) => read_table(p),
            None => parse_table(EMBEDDED_TABLE).context("embedded language table"),
        };

        match loaded {
            Ok(languages) => {
                debug!("Loaded {} language definitions", languages.len());
                Self { languages }
            }
            Err(e) => {
                warn!("Language table unavailable, language filter disabled: {:#}", e);
                Self::default()
            }
        }
    }

    /// Case-insensitive lookup by language name
    pub fn find(&self, name: &str) -> Option<&LanguageDefinition> {
        let wanted = name.trim().to_lowercase();
        self.languages
            .iter()
            .find(|lang| lang.name.to_lowercase() == wanted)
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

fn read_table(path: &Path) -> Result<Vec<LanguageDefinition>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_table(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse_table(content: &str) -> Result<Vec<LanguageDefinition>> {
    Ok(serde_json::from_str(content)?)
}
