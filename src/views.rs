//! Table Views
//!
//! Fixed table formatting shared by every list command, plus small cell
//! formatters for values Jira returns.

use chrono::DateTime;
use comfy_table::{presets, ContentArrangement, Row, Table};

/// Table formatting preference held by the session. Borderless: columns are
/// separated by spaces only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStyle {
    preset: &'static str,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self::borderless()
    }
}

impl TableStyle {
    pub const fn borderless() -> Self {
        Self {
            preset: presets::NOTHING,
        }
    }

    /// An empty table with the given header row.
    pub fn table<R: Into<Row>>(&self, header: R) -> Table {
        let mut table = Table::new();
        table
            .load_preset(self.preset)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(header);
        table
    }
}

/// `2024-03-01T10:15:00.000+0000` -> `2024-03-01`. Unparsable values pass through.
pub fn format_jira_date(value: &str) -> String {
    DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z")
        .map(|timestamp| timestamp.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| value.to_string())
}

/// `true` -> `yes`, `false` -> `no`.
pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
