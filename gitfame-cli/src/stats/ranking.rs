//! Ordering of author records

use crate::error::FameError;
use crate::models::AuthorStat;
use std::cmp::Ordering;
use std::str::FromStr;

/// Primary sort metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    #[default]
    Lines,
    Commits,
    Files,
}

impl FromStr for OrderBy {
    type Err = FameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lines" => Ok(OrderBy::Lines),
            "commits" => Ok(OrderBy::Commits),
            "files" => Ok(OrderBy::Files),
            _ => Err(FameError::InvalidOrder(s.to_string())),
        }
    }
}

impl std::fmt::Display for OrderBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderBy::Lines => write!(f, "lines"),
            OrderBy::Commits => write!(f, "commits"),
            OrderBy::Files => write!(f, "files"),
        }
    }
}

impl OrderBy {
    /// Metrics compared in order, all descending
    fn key(self, stat: &AuthorStat) -> [usize; 3] {
        match self {
            OrderBy::Lines => [stat.lines, stat.commits, stat.files],
            OrderBy::Commits => [stat.commits, stat.lines, stat.files],
            OrderBy::Files => [stat.files, stat.lines, stat.commits],
        }
    }

    /// Total order: metrics descending, then name ascending
    pub fn compare(self, a: &AuthorStat, b: &AuthorStat) -> Ordering {
        self.key(b)
            .cmp(&self.key(a))
            .then_with(|| a.name.cmp(&b.name))
    }
}

/// Sort author records for presentation
pub fn rank(mut stats: Vec<AuthorStat>, order: OrderBy) -> Vec<AuthorStat> {
    stats.sort_by(|a, b| order.compare(a, b));
    stats
}
