//! Plain comma-joined CSV output.
//!
//! Values are written verbatim, without quoting. A value containing a comma
//! or a line break therefore cannot be read back unambiguously.

use crate::merge::Accumulator;

/// Render the header line and one line per user in accumulator order.
///
/// The user's name fills the `username_column` cell, overriding any value a
/// source or patch stored under that caption. Cells a user never received are
/// empty.
pub fn render_csv(headers: &[String], acc: &Accumulator, username_column: &str) -> String {
    let mut lines = Vec::with_capacity(acc.len() + 1);
    lines.push(headers.join(","));

    for (username, row) in acc.iter() {
        let cells: Vec<&str> = headers
            .iter()
            .map(|column| {
                if column == username_column {
                    username
                } else {
                    row.get(column).map(String::as_str).unwrap_or("")
                }
            })
            .collect();
        lines.push(cells.join(","));
    }

    format!("{}\n", lines.join("\n"))
}
