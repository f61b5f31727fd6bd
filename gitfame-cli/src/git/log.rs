//! Latest-commit attribution for files without blameable lines
//!
//! Parses the default (`medium`) format of `git log -n 1`:
//!
//! ```text
//! commit <hash>
//! Author: <name> <<email>>
//! Date:   <date>
//! ```

use crate::error::{FameError, FameResult};
use crate::models::{AttributionEvent, AttributionStrategy, FileAttribution};

/// Display name of an `Author:` value: everything before the ` <email>` part.
fn display_name(identity: &str) -> Option<&str> {
    let open = identity.rfind('<')?;
    let name = &identity[..open];
    Some(name.strip_suffix(' ').unwrap_or(name))
}

/// Build a zero-line attribution for `path` from its latest log entry.
pub fn parse_last_commit(path: &str, output: &str) -> FameResult<FileAttribution> {
    let malformed = |reason: &str| FameError::MalformedLog {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let mut commit = None;
    let mut author = None;
    for line in output.lines() {
        if commit.is_none() {
            if let Some(rest) = line.strip_prefix("commit ") {
                commit = rest.split(' ').next().filter(|c| !c.is_empty());
                continue;
            }
        }
        if author.is_none() {
            if let Some(identity) = line.strip_prefix("Author: ") {
                author = Some(display_name(identity).ok_or_else(|| malformed("author without <email>"))?);
            }
        }
    }

    let commit = commit.ok_or_else(|| malformed("missing commit line"))?;
    let author = author.ok_or_else(|| malformed("missing Author line"))?;

    Ok(FileAttribution {
        path: path.to_string(),
        strategy: AttributionStrategy::LogFallback,
        events: vec![AttributionEvent {
            commit: commit.to_string(),
            author: author.to_string(),
            lines: 0,
        }],
        authors: vec![author.to_string()],
    })
}
