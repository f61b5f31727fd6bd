//! Parallel attribution pipeline using crossbeam channels
//!
//! Git invocations are I/O-bound and independent per file, so they run on a
//! pool of worker threads. Aggregation is stateful and runs on the calling
//! thread only.
//!
//! ```text
//!                     ┌─────────────┐
//!                     │   Producer  │  feeds candidate paths
//!                     └──────┬──────┘
//!                            │ bounded channel (path_tx → path_rx)
//!            ┌───────────────┼───────────────┐
//!            ▼               ▼               ▼
//!     ┌──────────┐    ┌──────────┐    ┌──────────┐
//!     │ Worker 1 │    │ Worker 2 │    │ Worker N │  blame / log + parse
//!     └────┬─────┘    └────┬─────┘    └────┬─────┘
//!          └───────────────┼───────────────┘
//!                          │ bounded channel (result_tx → result_rx)
//!                          ▼
//!                   ┌──────────────┐
//!                   │  Aggregator  │  single consumer, owns dedup state
//!                   └──────────────┘
//! ```
//!
//! Results are reordered by input position before aggregation, so the totals
//! equal a sequential run over the same file list.
//!
//! The first error stops the producer and is returned once the workers have
//! wound down. No partial result is ever returned.

use crate::error::FameResult;
use crate::git::{attribute_file, AttributionOptions, VcsSource};
use crate::models::FileAttribution;
use crate::stats::Aggregator;
use crossbeam_channel::bounded;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use tracing::debug;

/// Configuration for the attribution pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Number of worker threads
    pub num_workers: usize,
    /// Channel capacity (files in flight)
    pub buffer_size: usize,
}

impl PipelineConfig {
    /// `workers` overrides the available parallelism
    pub fn new(workers: Option<usize>) -> Self {
        let num_workers = workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        });
        Self {
            num_workers: num_workers.max(1),
            buffer_size: 64,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Attribute every file and aggregate the results.
///
/// `on_file` is called on the aggregating thread after each file is applied.
pub fn run<S, F>(
    source: &S,
    files: &[String],
    options: &AttributionOptions,
    config: &PipelineConfig,
    mut on_file: F,
) -> FameResult<Aggregator>
where
    S: VcsSource + ?Sized,
    F: FnMut(&FileAttribution),
{
    let num_workers = config.num_workers.min(files.len()).max(1);
    let buffer_size = config.buffer_size.max(1);
    debug!(
        "Attributing {} files with {} workers",
        files.len(),
        num_workers
    );

    let failed = AtomicBool::new(false);

    thread::scope(|scope| {
        let (path_tx, path_rx) = bounded::<(usize, &str)>(buffer_size);
        let (result_tx, result_rx) =
            bounded::<(usize, FameResult<FileAttribution>)>(buffer_size);
        let failed = &failed;

        // Producer: blocks when workers fall behind
        scope.spawn(move || {
            for (idx, path) in files.iter().enumerate() {
                if failed.load(Ordering::Relaxed) || path_tx.send((idx, path.as_str())).is_err() {
                    break;
                }
            }
        });

        for _ in 0..num_workers {
            let rx = path_rx.clone();
            let tx = result_tx.clone();
            scope.spawn(move || {
                for (idx, path) in rx {
                    if failed.load(Ordering::Relaxed) {
                        break;
                    }
                    if tx.send((idx, attribute_file(source, path, options))).is_err() {
                        break;
                    }
                }
            });
        }

        // Consumer must see the channels close once producer and workers finish
        drop(path_rx);
        drop(result_tx);

        // Files are applied in input order so the first owner of a commit does
        // not depend on which worker finishes first.
        let mut aggregator = Aggregator::new();
        let mut pending: BTreeMap<usize, FileAttribution> = BTreeMap::new();
        let mut next = 0;
        for (idx, result) in result_rx.iter() {
            match result {
                Ok(file) => {
                    pending.insert(idx, file);
                    while let Some(file) = pending.remove(&next) {
                        aggregator.apply(&file);
                        on_file(&file);
                        next += 1;
                    }
                }
                Err(e) => {
                    // Returning drops result_rx, which unblocks any worker mid-send
                    failed.store(true, Ordering::Relaxed);
                    return Err(e);
                }
            }
        }
        Ok(aggregator)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FameError;
    use crate::models::AuthorStat;
    use crate::stats::{rank, OrderBy};
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;

    struct ScriptedSource {
        blames: HashMap<String, String>,
        blame_calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(files: &[(&str, &str, &str, usize)]) -> Self {
            let blames = files
                .iter()
                .map(|(path, commit, author, lines)| {
                    let mut out = format!("{} 1 1 {}\nauthor {}\nfilename {}\n", commit, lines, author, path);
                    for i in 0..*lines {
                        if i > 0 {
                            out.push_str(&format!("{} {} {}\n", commit, i + 1, i + 1));
                        }
                        out.push_str("\tline\n");
                    }
                    (path.to_string(), out)
                })
                .collect();
            Self {
                blames,
                blame_calls: AtomicUsize::new(0),
            }
        }
    }

    impl VcsSource for ScriptedSource {
        fn list_files(&self, _revision: &str) -> FameResult<Vec<String>> {
            Ok(self.blames.keys().cloned().collect())
        }

        fn blame(&self, path: &str, _revision: &str) -> FameResult<String> {
            self.blame_calls.fetch_add(1, Ordering::Relaxed);
            self.blames.get(path).cloned().ok_or_else(|| FameError::Git {
                command: "blame",
                path: path.to_string(),
                message: "fatal: no such path".into(),
            })
        }

        fn last_commit(&self, path: &str, _revision: &str) -> FameResult<String> {
            Err(FameError::Git {
                command: "log",
                path: path.to_string(),
                message: "unexpected".into(),
            })
        }
    }

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_aggregates_all_files() {
        let source = ScriptedSource::new(&[
            ("a.rs", "c1", "Alice", 3),
            ("b.rs", "c2", "Bob", 2),
            ("c.rs", "c1", "Alice", 1),
        ]);
        let config = PipelineConfig {
            num_workers: 3,
            buffer_size: 1,
        };
        let mut seen = Vec::new();
        let agg = run(
            &source,
            &paths(&["a.rs", "b.rs", "c.rs"]),
            &AttributionOptions::default(),
            &config,
            |f| seen.push(f.path.clone()),
        )
        .unwrap();

        seen.sort();
        assert_eq!(seen, paths(&["a.rs", "b.rs", "c.rs"]));
        let alice = agg.get("Alice").unwrap();
        assert_eq!((alice.lines, alice.commits, alice.files), (4, 1, 2));
        let bob = agg.get("Bob").unwrap();
        assert_eq!((bob.lines, bob.commits, bob.files), (2, 1, 1));
    }

    #[test]
    fn test_no_files() {
        let source = ScriptedSource::new(&[]);
        let agg = run(
            &source,
            &[],
            &AttributionOptions::default(),
            &PipelineConfig::default(),
            |_| {},
        )
        .unwrap();
        assert_eq!(agg.author_count(), 0);
    }

    #[test]
    fn test_first_error_aborts_run() {
        let source = ScriptedSource::new(&[("a.rs", "c1", "Alice", 1)]);
        let mut files = paths(&["a.rs", "missing.rs"]);
        files.extend((0..200).map(|i| format!("missing{}.rs", i)));

        let err = run(
            &source,
            &files,
            &AttributionOptions::default(),
            &PipelineConfig {
                num_workers: 2,
                buffer_size: 2,
            },
            |_| {},
        )
        .unwrap_err();

        assert!(matches!(err, FameError::Git { command: "blame", .. }));
        // Fail-fast: the producer stops long before the end of the list
        assert!(source.blame_calls.load(Ordering::Relaxed) < files.len());
    }

    const SHARED: &str = "cccccccccccccccccccccccccccccccccccccccc";

    /// a.go is blamed to SHARED (author Alice, committer Carol); empty.txt has
    /// no lines and falls back to the log entry of SHARED.
    struct SlowSource {
        slow_path: &'static str,
    }

    impl SlowSource {
        fn pause(&self, path: &str) {
            if path == self.slow_path {
                std::thread::sleep(std::time::Duration::from_millis(200));
            }
        }
    }

    impl VcsSource for SlowSource {
        fn list_files(&self, _revision: &str) -> FameResult<Vec<String>> {
            Ok(paths(&["a.go", "empty.txt"]))
        }

        fn blame(&self, path: &str, _revision: &str) -> FameResult<String> {
            self.pause(path);
            if path != "a.go" {
                return Ok(String::new());
            }
            let mut out = format!(
                "{} 1 1 3\nauthor Alice\ncommitter Carol\nfilename a.go\n\tone\n",
                SHARED
            );
            out.push_str(&format!("{} 2 2\n\ttwo\n{} 3 3\n\tthree\n", SHARED, SHARED));
            Ok(out)
        }

        fn last_commit(&self, path: &str, _revision: &str) -> FameResult<String> {
            self.pause(path);
            Ok(format!(
                "commit {}\nAuthor: Alice <alice@example.com>\nDate:   Mon Jan 1 00:00:00 2024 +0000\n",
                SHARED
            ))
        }
    }

    fn committer_run(slow_path: &'static str, num_workers: usize) -> Vec<AuthorStat> {
        let source = SlowSource { slow_path };
        let options = AttributionOptions {
            revision: "HEAD".into(),
            use_committer: true,
        };
        let config = PipelineConfig {
            num_workers,
            buffer_size: 4,
        };
        let agg = run(&source, &paths(&["a.go", "empty.txt"]), &options, &config, |_| {}).unwrap();
        rank(agg.into_stats(), OrderBy::Lines)
    }

    #[test]
    fn test_result_independent_of_completion_order() {
        let sequential = committer_run("", 1);
        assert_eq!(
            sequential,
            vec![
                AuthorStat {
                    name: "Carol".into(),
                    lines: 3,
                    commits: 1,
                    files: 1,
                },
                AuthorStat {
                    name: "Alice".into(),
                    lines: 0,
                    commits: 0,
                    files: 1,
                },
            ]
        );
        assert_eq!(committer_run("a.go", 2), sequential);
        assert_eq!(committer_run("empty.txt", 2), sequential);
    }

    #[test]
    fn test_worker_count_is_bounded() {
        let config = PipelineConfig::new(Some(3));
        assert_eq!(config.num_workers, 3);
        assert_eq!(PipelineConfig::new(Some(0)).num_workers, 1);
    }
}
