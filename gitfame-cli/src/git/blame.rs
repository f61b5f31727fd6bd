//! `git blame --porcelain` parsing
//!
//! The porcelain stream is a sequence of blocks, one per group of lines:
//!
//! ```text
//! <hash> <orig-line> <final-line> <num-lines>
//! author <name>
//! author-mail <email>
//! ...
//! committer <name>
//! ...
//! summary <subject>
//! filename <path>
//! \t<line content>
//! <hash> <orig-line> <final-line>
//! \t<line content>
//! ```
//!
//! Author metadata is only emitted the first time a commit appears in the
//! stream, so the current author carries over between blocks.

use crate::error::{FameError, FameResult};
use crate::models::{AttributionEvent, AttributionStrategy, FileAttribution};
use std::collections::{HashMap, HashSet};

/// Author used when a `filename` line arrives before any `author` line
pub const PLACEHOLDER_AUTHOR: &str = "emptyAuthor";

/// Prefixes of metadata lines that never start a new commit block
const META_KEYWORDS: [&str; 6] = [
    "author",
    "committer",
    "summary",
    "boundary",
    "filename",
    "previous",
];

/// Kind of a single porcelain line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlameLine<'a> {
    /// Block header; carries the commit token
    CommitHeader(&'a str),
    Author(&'a str),
    Committer(&'a str),
    /// Closes the metadata of a block
    Filename,
    /// One attributed source line
    Content,
    /// author-mail, summary, boundary, previous, ...
    OtherMeta,
    Blank,
}

impl<'a> BlameLine<'a> {
    pub fn classify(line: &'a str) -> Self {
        if line.starts_with('\t') {
            return BlameLine::Content;
        }
        if line.is_empty() {
            return BlameLine::Blank;
        }
        if let Some(name) = line.strip_prefix("author ") {
            return BlameLine::Author(name);
        }
        if let Some(name) = line.strip_prefix("committer ") {
            return BlameLine::Committer(name);
        }
        if line.starts_with("filename ") {
            return BlameLine::Filename;
        }
        if META_KEYWORDS.iter().any(|kw| line.starts_with(kw)) {
            return BlameLine::OtherMeta;
        }
        BlameLine::CommitHeader(line.split(' ').next().unwrap_or(line))
    }
}

#[derive(Debug, Clone, Copy)]
enum State<'a> {
    AwaitingHeader,
    InCommitBlock { commit: &'a str },
}

/// Accumulates one file's attribution while walking the stream
struct BlameParser<'a> {
    path: &'a str,
    use_committer: bool,
    state: State<'a>,
    author: &'a str,
    /// commit -> index into `events`
    event_index: HashMap<&'a str, usize>,
    events: Vec<AttributionEvent>,
    credited: HashSet<&'a str>,
    authors: Vec<String>,
}

impl<'a> BlameParser<'a> {
    fn new(path: &'a str, use_committer: bool) -> Self {
        Self {
            path,
            use_committer,
            state: State::AwaitingHeader,
            author: PLACEHOLDER_AUTHOR,
            event_index: HashMap::new(),
            events: Vec::new(),
            credited: HashSet::new(),
            authors: Vec::new(),
        }
    }

    fn feed(&mut self, line_no: usize, line: &'a str) -> FameResult<()> {
        match BlameLine::classify(line) {
            BlameLine::CommitHeader(commit) => {
                self.state = State::InCommitBlock { commit };
            }
            BlameLine::Author(name) => self.author = name,
            BlameLine::Committer(name) => {
                if self.use_committer {
                    self.author = name;
                }
            }
            BlameLine::Filename => {
                let commit = self.current_commit(line_no, "filename")?;
                self.complete_association(commit);
            }
            BlameLine::Content => {
                let commit = self.current_commit(line_no, "content")?;
                let Some(&idx) = self.event_index.get(commit) else {
                    return Err(self.malformed(
                        line_no,
                        format!("content line for commit {} before its filename line", commit),
                    ));
                };
                self.events[idx].lines += 1;
            }
            BlameLine::OtherMeta | BlameLine::Blank => {}
        }
        Ok(())
    }

    fn current_commit(&self, line_no: usize, what: &str) -> FameResult<&'a str> {
        match self.state {
            State::InCommitBlock { commit } => Ok(commit),
            State::AwaitingHeader => {
                Err(self.malformed(line_no, format!("{} line before any commit header", what)))
            }
        }
    }

    /// `filename` closes a block: bind the commit to the current author (first
    /// binding wins) and credit the author with this file once.
    fn complete_association(&mut self, commit: &'a str) {
        let author = self.author;
        let events = &mut self.events;
        self.event_index.entry(commit).or_insert_with(|| {
            events.push(AttributionEvent {
                commit: commit.to_string(),
                author: author.to_string(),
                lines: 0,
            });
            events.len() - 1
        });

        if self.credited.insert(author) {
            self.authors.push(author.to_string());
        }
    }

    fn malformed(&self, line_no: usize, reason: String) -> FameError {
        FameError::MalformedBlame {
            path: self.path.to_string(),
            line: line_no,
            reason,
        }
    }

    fn finish(self) -> FileAttribution {
        FileAttribution {
            path: self.path.to_string(),
            strategy: AttributionStrategy::Blame,
            events: self.events,
            authors: self.authors,
        }
    }
}

/// Parse one file's porcelain blame output.
///
/// With `use_committer`, `committer` lines replace the current author.
pub fn parse_porcelain(path: &str, output: &str, use_committer: bool) -> FameResult<FileAttribution> {
    let mut parser = BlameParser::new(path, use_committer);
    for (idx, line) in output.lines().enumerate() {
        parser.feed(idx + 1, line)?;
    }
    Ok(parser.finish())
}
