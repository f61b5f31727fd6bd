//! Output reporters for ranked author statistics
//!
//! Supports multiple output formats:
//! - `tabular` - Column-aligned plain text
//! - `csv` - Comma-separated values with a header row
//! - `json` - A single JSON array
//! - `json-lines` - One JSON object per line
//!
//! Reporters never reorder or alter the records they are given.

mod csv;
mod json;
mod table;

use crate::error::FameError;
use crate::models::AuthorStat;
use anyhow::Result;
use std::str::FromStr;

/// Column headers shared by the tabular and CSV formats
pub(crate) const HEADER: [&str; 4] = ["Name", "Lines", "Commits", "Files"];

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Tabular,
    Csv,
    Json,
    JsonLines,
}

impl FromStr for OutputFormat {
    type Err = FameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tabular" => Ok(OutputFormat::Tabular),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "json-lines" => Ok(OutputFormat::JsonLines),
            _ => Err(FameError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Tabular => write!(f, "tabular"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::JsonLines => write!(f, "json-lines"),
        }
    }
}

/// Render ranked statistics in the specified format
pub fn report(stats: &[AuthorStat], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Tabular => Ok(table::render(stats)),
        OutputFormat::Csv => Ok(csv::render(stats)),
        OutputFormat::Json => json::render(stats),
        OutputFormat::JsonLines => json::render_lines(stats),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A small ranked sequence for reporter tests
    pub(crate) fn test_stats() -> Vec<AuthorStat> {
        vec![
            AuthorStat {
                name: "Alice Liddell".into(),
                lines: 1200,
                commits: 31,
                files: 12,
            },
            AuthorStat {
                name: "Bob".into(),
                lines: 7,
                commits: 2,
                files: 1,
            },
        ]
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(
            OutputFormat::from_str("tabular").unwrap(),
            OutputFormat::Tabular
        );
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(
            OutputFormat::from_str("json-lines").unwrap(),
            OutputFormat::JsonLines
        );
        assert!(matches!(
            OutputFormat::from_str("xml"),
            Err(FameError::InvalidFormat(_))
        ));
        assert_eq!(OutputFormat::JsonLines.to_string(), "json-lines");
    }

    #[test]
    fn test_report_dispatch() {
        let stats = test_stats();
        assert!(report(&stats, OutputFormat::Tabular)
            .unwrap()
            .starts_with("Name"));
        assert!(report(&stats, OutputFormat::Csv)
            .unwrap()
            .starts_with("Name,Lines,Commits,Files\n"));
        assert!(report(&stats, OutputFormat::Json).unwrap().starts_with('['));
        assert_eq!(
            report(&stats, OutputFormat::JsonLines).unwrap().lines().count(),
            2
        );
    }
}
