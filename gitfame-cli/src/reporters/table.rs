//! Column-aligned reporter
//!
//! Every column except the last is padded to its widest cell plus one space.
//! The last column is written as is.

use super::HEADER;
use crate::models::AuthorStat;

/// Render stats as an aligned table
pub fn render(stats: &[AuthorStat]) -> String {
    let mut rows: Vec<[String; 4]> = Vec::with_capacity(stats.len() + 1);
    rows.push(HEADER.map(String::from));
    for stat in stats {
        rows.push([
            stat.name.clone(),
            stat.lines.to_string(),
            stat.commits.to_string(),
            stat.files.to_string(),
        ]);
    }

    let mut widths = [0usize; 3];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in &rows {
        for (cell, width) in row.iter().zip(widths) {
            out.push_str(cell);
            let pad = width - cell.chars().count() + 1;
            out.extend(std::iter::repeat(' ').take(pad));
        }
        out.push_str(&row[3]);
        out.push('\n');
    }
    out
}
