//! CLI definition and run loop

use crate::config::{load_config, FameConfig, Settings};
use crate::filters::{split_list, FileSelector, FilterSpec};
use crate::git::{AttributionOptions, GitCli, VcsSource};
use crate::languages::LanguageRegistry;
use crate::models::AuthorStat;
use crate::pipeline::{self, PipelineConfig};
use crate::reporters;
use crate::stats::rank;
use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// gitfame - Per-author contribution statistics for a git repository
#[derive(Parser, Debug)]
#[command(name = "gitfame")]
#[command(
    version,
    about = "Rank the authors of a git repository by surviving lines, commits and files",
    long_about = "gitfame blames every tracked file at a revision and credits each surviving \
line to the commit that introduced it. Commits are counted once per author across the \
whole repository; a file counts for every author with a commit in it.\n\n\
Defaults can be set in .gitfame.toml in the repository or in \
~/.config/gitfame/config.toml. Flags override both.",
    after_help = "\
Examples:
  gitfame                                    Rank authors of the current repository
  gitfame --repository ../other --format csv CSV for another checkout
  gitfame --order-by commits --revision v1.0 Rank by commits at a tag
  gitfame --extensions .rs,.toml             Only Rust sources and manifests
  gitfame --languages go,python              Only Go and Python files
  gitfame --exclude 'vendor/*' -o fame.json --format json"
)]
pub struct Cli {
    /// Path to the repository (default: current directory)
    #[arg(long, default_value = ".")]
    pub repository: PathBuf,

    /// Revision to attribute at (default: HEAD)
    #[arg(long)]
    pub revision: Option<String>,

    /// Credit lines to the committer instead of the author
    #[arg(long)]
    pub use_committer: bool,

    /// Sort key: lines, commits, files (default: lines)
    #[arg(long)]
    pub order_by: Option<String>,

    /// Output format: tabular, csv, json, json-lines (default: tabular)
    #[arg(long)]
    pub format: Option<String>,

    /// Comma-separated file extensions to keep, e.g. ".go,.rs"
    #[arg(long)]
    pub extensions: Option<String>,

    /// Comma-separated language names to keep, e.g. "go,python"
    #[arg(long)]
    pub languages: Option<String>,

    /// Comma-separated glob patterns to skip
    #[arg(long)]
    pub exclude: Option<String>,

    /// Comma-separated glob patterns; only matching paths are kept
    #[arg(long)]
    pub restrict_to: Option<String>,

    /// JSON language table replacing the built-in one
    #[arg(long, env = "GITFAME_LANGUAGES_FILE")]
    pub languages_file: Option<PathBuf>,

    /// Number of parallel git workers (1-64)
    #[arg(long, value_parser = parse_workers)]
    pub workers: Option<usize>,

    /// Write the report to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Hide the progress bar
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl Cli {
    /// Flags that were given, as the highest-priority config layer
    pub fn overrides(&self) -> FameConfig {
        FameConfig {
            revision: self.revision.clone(),
            order_by: self.order_by.clone(),
            format: self.format.clone(),
            use_committer: self.use_committer.then_some(true),
            workers: self.workers,
            languages_file: self.languages_file.clone(),
            filters: FilterSpec {
                extensions: self.extensions.as_deref().and_then(split_list),
                languages: self.languages.as_deref().and_then(split_list),
                exclude: self.exclude.as_deref().and_then(split_list),
                restrict_to: self.restrict_to.as_deref().and_then(split_list),
            },
        }
    }

    /// Merge config files and flags, then validate
    pub fn settings(&self) -> Result<Settings> {
        let mut config = load_config(&self.repository);
        config.merge(self.overrides());
        Ok(Settings::resolve(self.repository.clone(), config)?)
    }
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings()?;
    let stats = collect(&settings, !cli.quiet)?;
    let report = reporters::report(&stats, settings.format)?;
    write_report(&report, cli.output.as_deref())
}

/// Attribute every selected file and return the ranked statistics
pub fn collect(settings: &Settings, show_progress: bool) -> Result<Vec<AuthorStat>> {
    let registry = LanguageRegistry::load(settings.languages_file.as_deref());
    let git = GitCli::open(&settings.repository)?;

    let tracked = git
        .list_files(&settings.revision)
        .with_context(|| format!("Failed to list files at {}", settings.revision))?;
    let selector = FileSelector::new(&settings.filters, &registry);
    let files = selector.select(&tracked);
    info!("Selected {} of {} tracked files", files.len(), tracked.len());

    let options = AttributionOptions {
        revision: settings.revision.clone(),
        use_committer: settings.use_committer,
    };
    let config = PipelineConfig::new(settings.workers);

    let bar = progress_bar(files.len() as u64, show_progress)?;
    let result = pipeline::run(&git, &files, &options, &config, |file| {
        bar.set_message(file.path.clone());
        bar.inc(1);
    });
    bar.finish_and_clear();
    let aggregator = result?;

    info!(
        "Attributed {} files: {} authors, {} commits",
        aggregator.files_applied(),
        aggregator.author_count(),
        aggregator.commit_count()
    );
    Ok(rank(aggregator.into_stats(), settings.order_by))
}

fn progress_bar(len: u64, show: bool) -> Result<ProgressBar> {
    if !show {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}")?
            .progress_chars("█▓▒░  "),
    );
    Ok(bar)
}

fn write_report(report: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, report)
            .with_context(|| format!("Failed to write report to {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(report.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::OutputFormat;
    use crate::stats::OrderBy;

    #[test]
    fn test_parse_workers() {
        assert_eq!(parse_workers("8"), Ok(8));
        assert!(parse_workers("0").is_err());
        assert!(parse_workers("65").is_err());
        assert!(parse_workers("many").is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["gitfame"]);
        assert_eq!(cli.repository, PathBuf::from("."));
        assert_eq!(cli.log_level, "warn");
        assert_eq!(cli.overrides().filters, FilterSpec::default());
        assert_eq!(cli.overrides().use_committer, None);
    }

    #[test]
    fn test_list_flags_are_split() {
        let cli = Cli::parse_from([
            "gitfame",
            "--extensions",
            ".go,.rs",
            "--exclude",
            "vendor/*",
            "--languages",
            "",
        ]);
        let filters = cli.overrides().filters;
        assert_eq!(
            filters.extensions,
            Some(vec![".go".to_string(), ".rs".to_string()])
        );
        assert_eq!(filters.exclude, Some(vec!["vendor/*".to_string()]));
        assert_eq!(filters.languages, None);
    }

    #[test]
    fn test_flags_override_project_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(crate::config::PROJECT_CONFIG_FILE),
            "format = \"csv\"\norder_by = \"files\"\n",
        )
        .unwrap();
        let repo = dir.path().to_str().unwrap();
        let cli = Cli::parse_from(["gitfame", "--repository", repo, "--format", "json"]);
        let settings = cli.settings().unwrap();
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.order_by, OrderBy::Files);
    }

    #[test]
    fn test_invalid_order_is_config_error() {
        let cli = Cli::parse_from(["gitfame", "--order-by", "stars"]);
        let err = cli.settings().unwrap_err();
        let fame = err.downcast_ref::<crate::error::FameError>().unwrap();
        assert_eq!(fame.exit_code(), crate::error::EXIT_CONFIG);
    }

    #[test]
    fn test_workers_flag_is_validated() {
        assert!(Cli::try_parse_from(["gitfame", "--workers", "0"]).is_err());
        assert_eq!(
            Cli::try_parse_from(["gitfame", "--workers", "4"])
                .unwrap()
                .workers,
            Some(4)
        );
    }
}
