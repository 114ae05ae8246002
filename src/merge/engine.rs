//! Folding source records into the accumulator.

use super::{Accumulator, MergeStats};
use crate::domain::SourceEntry;
use crate::error::{MergeError, MergeResult};
use crate::quoted::QuotedCsv;

/// Merge one resolved source into `acc` under the source's caption.
///
/// The username and value columns must both exist in the file header.
/// Rows with a blank username are skipped; a username repeated within the
/// file keeps its last value.
pub fn merge_source(
    acc: &mut Accumulator,
    source: &SourceEntry,
    stats: &mut MergeStats,
) -> MergeResult<()> {
    let (Some(path), Some(caption)) = (source.path.as_deref(), source.caption.as_deref()) else {
        return Ok(());
    };

    let csv = QuotedCsv::open(path)?;
    let mut reader = csv.dict_reader()?;

    let Some(header) = reader.header() else {
        tracing::warn!("{} has no header line; column '{}' stays empty", path.display(), caption);
        return Ok(());
    };
    for (role, column) in [("username", &source.username_column), ("value", &source.value_column)] {
        if !header.contains(column) {
            return Err(MergeError::MissingColumn {
                path: path.to_path_buf(),
                column: column.clone(),
                role,
            });
        }
    }

    let mut merged = 0usize;
    for record in reader.by_ref() {
        let record = record?;
        let username = record.get(&source.username_column).unwrap_or("");
        if username.trim().is_empty() {
            tracing::debug!("{}:{}: blank username, row skipped", path.display(), record.line());
            stats.blank_usernames_skipped += 1;
            continue;
        }
        let value = record.get(&source.value_column).unwrap_or("");
        acc.set(username, caption, value);
        merged += 1;
    }

    tracing::debug!("Merged {} row(s) from {} into '{}'", merged, path.display(), caption);
    stats.rows_merged += merged;
    Ok(())
}
