//! Error taxonomy for gitfame
//!
//! Configuration errors and collaborator failures are both fatal; they differ
//! only in the exit code reported to the shell.

use thiserror::Error;

/// Exit code for invalid flags or config values, and for failing to list the
/// repository's files.
pub const EXIT_CONFIG: i32 = 1;
/// Exit code for git failures and unparseable git output.
pub const EXIT_COLLABORATOR: i32 = 7;

/// Errors that abort a gitfame run
#[derive(Error, Debug)]
pub enum FameError {
    #[error("Unknown order '{0}'. Valid orders: lines, commits, files")]
    InvalidOrder(String),

    #[error("Unknown format '{0}'. Valid formats: tabular, csv, json, json-lines")]
    InvalidFormat(String),

    #[error("Invalid revision '{0}'")]
    InvalidRevision(String),

    #[error("git {command} failed for '{path}': {message}")]
    Git {
        command: &'static str,
        path: String,
        message: String,
    },

    #[error("Malformed blame output for '{path}' at line {line}: {reason}")]
    MalformedBlame {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("Malformed log output for '{path}': {reason}")]
    MalformedLog { path: String, reason: String },
}

impl FameError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            FameError::InvalidOrder(_)
            | FameError::InvalidFormat(_)
            | FameError::InvalidRevision(_) => EXIT_CONFIG,
            // Opening the repository and listing its files happen before any
            // per-file work
            FameError::Git {
                command: "discover" | "ls-tree",
                ..
            } => EXIT_CONFIG,
            FameError::Git { .. }
            | FameError::MalformedBlame { .. }
            | FameError::MalformedLog { .. } => EXIT_COLLABORATOR,
        }
    }
}

pub type FameResult<T> = Result<T, FameError>;
