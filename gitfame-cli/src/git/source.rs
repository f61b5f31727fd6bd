//! Access to the git command-line tool
//!
//! Every query runs `git` once in the repository directory and returns its
//! stdout. A non-zero exit is a [`FameError::Git`]; nothing is retried.

use crate::error::{FameError, FameResult};
use anyhow::{Context, Result};
use git2::Repository;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// The three version-control queries attribution needs
pub trait VcsSource: Send + Sync {
    /// All paths tracked at `revision`, in git's order
    fn list_files(&self, revision: &str) -> FameResult<Vec<String>>;

    /// Porcelain blame of `path`; empty for files with no lines
    fn blame(&self, path: &str, revision: &str) -> FameResult<String>;

    /// The latest log entry touching `path`
    fn last_commit(&self, path: &str, revision: &str) -> FameResult<String>;
}

/// [`VcsSource`] backed by the `git` binary
#[derive(Debug, Clone)]
pub struct GitCli {
    dir: PathBuf,
}

impl GitCli {
    /// Use the repository containing `path`.
    ///
    /// Queries run in `path` itself, so a subdirectory limits the file list to
    /// that subtree.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)
            .map_err(|e| FameError::Git {
                command: "discover",
                path: path.display().to_string(),
                message: e.message().to_string(),
            })
            .with_context(|| format!("Failed to open git repository at {:?}", path))?;
        debug!("Opened git repository at {:?}", repo.path());
        Ok(Self {
            dir: path.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn run(&self, command: &'static str, path: &str, args: &[&str]) -> FameResult<String> {
        let output = Command::new("git")
            .arg(command)
            .args(args)
            .current_dir(&self.dir)
            .output()
            .map_err(|e| FameError::Git {
                command,
                path: path.to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(FameError::Git {
                command,
                path: path.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Reject values that look like flags to prevent git flag injection
fn check_revision(revision: &str) -> FameResult<()> {
    if revision.is_empty() || revision.starts_with('-') {
        return Err(FameError::InvalidRevision(revision.to_string()));
    }
    Ok(())
}

impl VcsSource for GitCli {
    fn list_files(&self, revision: &str) -> FameResult<Vec<String>> {
        check_revision(revision)?;
        let output = self.run("ls-tree", ".", &["-r", "-z", "--name-only", revision])?;
        Ok(output
            .split('\0')
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect())
    }

    fn blame(&self, path: &str, revision: &str) -> FameResult<String> {
        check_revision(revision)?;
        self.run("blame", path, &["--porcelain", revision, "--", path])
    }

    fn last_commit(&self, path: &str, revision: &str) -> FameResult<String> {
        check_revision(revision)?;
        // Pin the format parse_last_commit expects, whatever format.pretty says
        self.run(
            "log",
            path,
            &["-n", "1", "--no-decorate", "--format=medium", revision, "--", path],
        )
    }
}
