//! Cross-file ownership aggregation
//!
//! Folds [`FileAttribution`]s into one [`AuthorStat`] per author.
//!
//! # Deduplication
//!
//! ```text
//! commits: global. The first event that mentions a commit makes its author
//!          the commit's owner and counts the commit once for that owner.
//! lines:   always credited to the commit's owner.
//! files:   per author. Every author credited by a file gets +1.
//! ```
//!
//! All dedup state lives in the [`Aggregator`], one per run.

pub mod ranking;

pub use ranking::{rank, OrderBy};

use crate::models::{AuthorStat, FileAttribution};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Accumulates author statistics for one run
#[derive(Debug, Default)]
pub struct Aggregator {
    stats: HashMap<String, AuthorStat>,
    /// commit -> owning author
    commit_owner: HashMap<String, String>,
    files_applied: usize,
}

fn author_entry<'a>(stats: &'a mut HashMap<String, AuthorStat>, name: &str) -> &'a mut AuthorStat {
    stats
        .entry(name.to_string())
        .or_insert_with(|| AuthorStat::new(name))
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file into the totals. Each file must be applied once.
    pub fn apply(&mut self, file: &FileAttribution) {
        for event in &file.events {
            author_entry(&mut self.stats, &event.author);

            let owner = match self.commit_owner.entry(event.commit.clone()) {
                Entry::Occupied(slot) => slot.into_mut(),
                Entry::Vacant(slot) => {
                    author_entry(&mut self.stats, &event.author).commits += 1;
                    slot.insert(event.author.clone())
                }
            };

            if event.lines > 0 {
                author_entry(&mut self.stats, owner).lines += event.lines;
            }
        }

        for author in &file.authors {
            author_entry(&mut self.stats, author).files += 1;
        }

        self.files_applied += 1;
    }

    pub fn get(&self, author: &str) -> Option<&AuthorStat> {
        self.stats.get(author)
    }

    pub fn author_count(&self) -> usize {
        self.stats.len()
    }

    /// Distinct commits seen so far
    pub fn commit_count(&self) -> usize {
        self.commit_owner.len()
    }

    pub fn files_applied(&self) -> usize {
        self.files_applied
    }

    /// Unordered author records; pass them to [`rank`] for output order
    pub fn into_stats(self) -> Vec<AuthorStat> {
        self.stats.into_values().collect()
    }
}
