//! File selection
//!
//! Four independent predicates, all of which must pass:
//!
//! - `--extensions`: file extension allow-list
//! - `--languages`: language allow-list, resolved through the registry
//! - `--exclude`: glob deny-list
//! - `--restrict-to`: glob allow-list
//!
//! An unset (or empty) list never restricts anything. Requesting only unknown
//! languages also restricts nothing.

use crate::languages::LanguageRegistry;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, warn};

/// The four optional selection lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub restrict_to: Option<Vec<String>>,
}

/// Split a comma-separated flag value. Empty input means "unset"; items are
/// kept verbatim, so `","` asks for files without an extension.
pub fn split_list(value: &str) -> Option<Vec<String>> {
    if value.is_empty() {
        return None;
    }
    Some(value.split(',').map(String::from).collect())
}

/// Extension of the final path component, including the leading `.`.
///
/// Returns an empty string when the base name has no `.`.
pub fn extension_of(path: &str) -> &str {
    let base = path.rsplit('/').next().unwrap_or(path);
    base.rfind('.').map(|i| &base[i..]).unwrap_or("")
}

/// A compiled glob list. `matchers` is None when nothing was requested.
#[derive(Debug, Clone)]
struct PatternList {
    matchers: Option<GlobSet>,
}

impl PatternList {
    fn compile(patterns: Option<&[String]>) -> Self {
        let Some(patterns) = patterns.filter(|p| !p.is_empty()) else {
            return Self { matchers: None };
        };

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .backslash_escape(true)
                .build();
            match glob {
                Ok(glob) => {
                    builder.add(glob);
                }
                // Malformed patterns simply never match
                Err(e) => warn!("Ignoring invalid pattern '{}': {}", pattern, e),
            }
        }

        let matchers = match builder.build() {
            Ok(set) => set,
            Err(e) => {
                warn!("Failed to compile patterns: {}", e);
                GlobSet::empty()
            }
        };
        Self {
            matchers: Some(matchers),
        }
    }

    fn is_set(&self) -> bool {
        self.matchers.is_some()
    }

    fn matches(&self, path: &str) -> bool {
        self.matchers
            .as_ref()
            .map(|set| set.is_match(path))
            .unwrap_or(false)
    }
}

/// Applies a [`FilterSpec`] to lists of tracked paths
#[derive(Debug, Clone)]
pub struct FileSelector {
    extensions: Option<HashSet<String>>,
    /// Union of the extensions of every requested language that is known
    language_extensions: Option<HashSet<String>>,
    exclude: PatternList,
    restrict_to: PatternList,
}

impl FileSelector {
    pub fn new(spec: &FilterSpec, registry: &LanguageRegistry) -> Self {
        let extensions = spec
            .extensions
            .as_ref()
            .filter(|e| !e.is_empty())
            .map(|e| e.iter().cloned().collect::<HashSet<_>>());

        let language_extensions = spec
            .languages
            .as_ref()
            .filter(|l| !l.is_empty())
            .and_then(|requested| {
                let known: Vec<_> = requested
                    .iter()
                    .filter_map(|name| registry.find(name))
                    .collect();
                if known.is_empty() {
                    debug!(
                        "None of the requested languages {:?} are known, language filter disabled",
                        requested
                    );
                    return None;
                }
                Some(
                    known
                        .iter()
                        .flat_map(|lang| lang.extensions.iter().cloned())
                        .collect::<HashSet<_>>(),
                )
            });

        Self {
            extensions,
            language_extensions,
            exclude: PatternList::compile(spec.exclude.as_deref()),
            restrict_to: PatternList::compile(spec.restrict_to.as_deref()),
        }
    }

    pub fn passes_extension(&self, path: &str) -> bool {
        match &self.extensions {
            Some(allowed) => allowed.contains(extension_of(path)),
            None => true,
        }
    }

    pub fn passes_language(&self, path: &str) -> bool {
        match &self.language_extensions {
            Some(allowed) => allowed.contains(extension_of(path)),
            None => true,
        }
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude.matches(path)
    }

    pub fn passes_restriction(&self, path: &str) -> bool {
        !self.restrict_to.is_set() || self.restrict_to.matches(path)
    }

    /// True when `path` passes all four predicates
    pub fn accepts(&self, path: &str) -> bool {
        self.passes_extension(path)
            && self.passes_language(path)
            && !self.is_excluded(path)
            && self.passes_restriction(path)
    }

    /// Keep the accepted paths, preserving input order
    pub fn select(&self, files: &[String]) -> Vec<String> {
        files.iter().filter(|f| self.accepts(f)).cloned().collect()
    }
}
