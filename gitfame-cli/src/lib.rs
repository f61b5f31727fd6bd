//! gitfame - per-author contribution statistics from git blame
//!
//! Library crate backing the `gitfame` binary. The pieces compose as:
//! list tracked files, select them ([`filters`]), attribute each one
//! ([`git`]) on a worker pool ([`pipeline`]), aggregate ([`stats`]), rank
//! and render ([`reporters`]).

pub mod cli;
pub mod config;
pub mod error;
pub mod filters;
pub mod git;
pub mod languages;
pub mod models;
pub mod pipeline;
pub mod reporters;
pub mod stats;
