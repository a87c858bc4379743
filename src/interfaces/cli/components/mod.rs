//! Presentational pieces shared by the pages. Everything here writes plain
//! text and holds no state.

pub mod artifact;
pub mod chart;
pub mod endpoint_card;
pub mod test_cases;

use std::io::{self, Write};

use chrono::DateTime;

pub fn badge(active: bool) -> &'static str {
    if active {
        "[Active]"
    } else {
        "[Inactive]"
    }
}

pub fn breadcrumb(items: &[&str]) -> String {
    let mut trail = vec!["My Account", "Endpoints"];
    trail.extend(items.iter().copied().filter(|item| !item.is_empty()));
    trail.join(" / ")
}

/// `YYYY-MM-DD HH:MM:SS` for RFC 3339 input; anything else is shown as is.
pub fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn page_header(out: &mut dyn Write, trail: &[&str], title: &str) -> io::Result<()> {
    writeln!(out, "{}", breadcrumb(trail))?;
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(title.chars().count().max(3)))
}

pub fn section(out: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "-".repeat(title.chars().count().max(3)))
}

pub fn field(out: &mut dyn Write, label: &str, value: &str) -> io::Result<()> {
    writeln!(out, "  {:<20} {}", format!("{}:", label), value)
}

/// Multi-line text, indented and labelled with its syntax.
pub fn code_block(out: &mut dyn Write, language: &str, text: &str) -> io::Result<()> {
    writeln!(out, "  ```{}", language)?;
    for line in text.lines() {
        writeln!(out, "  {}", line)?;
    }
    writeln!(out, "  ```")
}
