//! CSV reporter

use super::HEADER;
use crate::models::AuthorStat;

/// Quote a field when it contains a delimiter, a quote or a line break, or
/// starts with whitespace. Embedded quotes are doubled.
fn escape_field(field: &str) -> String {
    let needs_quotes = field.contains([',', '"', '\r', '\n'])
        || field.chars().next().is_some_and(char::is_whitespace);
    if needs_quotes {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render stats as CSV with a header row
pub fn render(stats: &[AuthorStat]) -> String {
    let mut out = HEADER.join(",");
    out.push('\n');
    for stat in stats {
        out.push_str(&format!(
            "{},{},{},{}\n",
            escape_field(&stat.name),
            stat.lines,
            stat.commits,
            stat.files
        ));
    }
    out
}
