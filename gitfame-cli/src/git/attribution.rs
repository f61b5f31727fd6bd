//! Per-file attribution strategy selection

use super::blame::parse_porcelain;
use super::log::parse_last_commit;
use super::source::VcsSource;
use crate::error::FameResult;
use crate::models::{AttributionStrategy, FileAttribution};
use tracing::debug;

/// Options shared by every file of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributionOptions {
    /// Revision to blame at
    pub revision: String,
    /// Attribute lines to the committer instead of the author
    pub use_committer: bool,
}

impl Default for AttributionOptions {
    fn default() -> Self {
        Self {
            revision: "HEAD".to_string(),
            use_committer: false,
        }
    }
}

/// Whether a blame record has any attributable lines
pub fn has_attributable_lines(blame_output: &str) -> bool {
    !blame_output.trim().is_empty()
}

/// Pick the strategy for a file from its blame output
pub fn select_strategy(blame_output: &str) -> AttributionStrategy {
    if has_attributable_lines(blame_output) {
        AttributionStrategy::Blame
    } else {
        AttributionStrategy::LogFallback
    }
}

/// Attribute one file: blame it, or fall back to its latest commit.
pub fn attribute_file<S: VcsSource + ?Sized>(
    source: &S,
    path: &str,
    options: &AttributionOptions,
) -> FameResult<FileAttribution> {
    let blame = source.blame(path, &options.revision)?;
    match select_strategy(&blame) {
        AttributionStrategy::Blame => parse_porcelain(path, &blame, options.use_committer),
        AttributionStrategy::LogFallback => {
            debug!("{} has no blameable lines, using latest commit", path);
            let log = source.last_commit(path, &options.revision)?;
            parse_last_commit(path, &log)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FameError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeSource {
        blames: HashMap<String, String>,
        logs: HashMap<String, String>,
        log_calls: AtomicUsize,
    }

    impl VcsSource for FakeSource {
        fn list_files(&self, _revision: &str) -> FameResult<Vec<String>> {
            Ok(self.blames.keys().cloned().collect())
        }

        fn blame(&self, path: &str, _revision: &str) -> FameResult<String> {
            self.blames.get(path).cloned().ok_or_else(|| FameError::Git {
                command: "blame",
                path: path.to_string(),
                message: "no such path".into(),
            })
        }

        fn last_commit(&self, path: &str, _revision: &str) -> FameResult<String> {
            self.log_calls.fetch_add(1, Ordering::Relaxed);
            self.logs.get(path).cloned().ok_or_else(|| FameError::Git {
                command: "log",
                path: path.to_string(),
                message: "no log".into(),
            })
        }
    }

    #[test]
    fn test_select_strategy() {
        assert_eq!(select_strategy(""), AttributionStrategy::LogFallback);
        assert_eq!(select_strategy("\n"), AttributionStrategy::LogFallback);
        assert_eq!(select_strategy("abc 1 1 1\n"), AttributionStrategy::Blame);
    }

    #[test]
    fn test_blame_strategy_skips_log() {
        let mut source = FakeSource::default();
        source.blames.insert(
            "a.go".into(),
            "abc 1 1 1\nauthor Alice\nfilename a.go\n\tpackage a\n".into(),
        );
        let file = attribute_file(&source, "a.go", &AttributionOptions::default()).unwrap();
        assert_eq!(file.strategy, AttributionStrategy::Blame);
        assert_eq!(file.events[0].lines, 1);
        assert_eq!(source.log_calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_empty_blame_falls_back_to_log() {
        let mut source = FakeSource::default();
        source.blames.insert("empty".into(), String::new());
        source
            .logs
            .insert("empty".into(), "commit def\nAuthor: Bob <bob@x>\n".into());
        let file = attribute_file(&source, "empty", &AttributionOptions::default()).unwrap();
        assert_eq!(file.strategy, AttributionStrategy::LogFallback);
        assert_eq!(file.events[0].author, "Bob");
        assert_eq!(source.log_calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_collaborator_failures_propagate() {
        let source = FakeSource::default();
        let err = attribute_file(&source, "missing", &AttributionOptions::default()).unwrap_err();
        assert!(matches!(err, FameError::Git { command: "blame", .. }));

        let mut source = FakeSource::default();
        source.blames.insert("empty".into(), String::new());
        let err = attribute_file(&source, "empty", &AttributionOptions::default()).unwrap_err();
        assert!(matches!(err, FameError::Git { command: "log", .. }));
    }
}
