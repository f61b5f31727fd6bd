//! JSON reporters
//!
//! `json` emits the ranked sequence as one compact array; `json-lines` emits
//! one compact object per author. Both end with a newline.

use crate::models::AuthorStat;
use anyhow::Result;

/// Render stats as a single JSON array
pub fn render(stats: &[AuthorStat]) -> Result<String> {
    let mut out = serde_json::to_string(stats)?;
    out.push('\n');
    Ok(out)
}

/// Render stats as newline-delimited JSON objects
pub fn render_lines(stats: &[AuthorStat]) -> Result<String> {
    let mut out = String::new();
    for stat in stats {
        out.push_str(&serde_json::to_string(stat)?);
        out.push('\n');
    }
    Ok(out)
}
