//! Git attribution module
//!
//! Turns the raw text produced by git into per-file attribution records.
//!
//! # Features
//!
//! - Parse `git blame --porcelain` output into per-commit line counts
//! - Fall back to the latest `git log` entry for files with no lines
//! - Abstract the git invocation behind [`VcsSource`] so the parsers can be
//!   driven without a repository
//!
//! # Example
//!
//! ```no_run
//! use gitfame::git::{attribute_file, AttributionOptions, GitCli, VcsSource};
//! use std::path::Path;
//!
//! let git = GitCli::open(Path::new("/path/to/repo")).unwrap();
//! let options = AttributionOptions::default();
//! for path in git.list_files(&options.revision).unwrap() {
//!     let file = attribute_file(&git, &path, &options).unwrap();
//!     println!("{}: {} commits", file.path, file.events.len());
//! }
//! ```

pub mod attribution;
pub mod blame;
pub mod log;
pub mod source;

pub use attribution::{attribute_file, has_attributable_lines, AttributionOptions};
pub use blame::{parse_porcelain, BlameLine, PLACEHOLDER_AUTHOR};
pub use log::parse_last_commit;
pub use source::{GitCli, VcsSource};
