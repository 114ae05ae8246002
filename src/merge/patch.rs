//! Manual corrections applied after all sources are merged.

use super::{Accumulator, MergeStats};
use crate::domain::{PATCH_CAPTION_COLUMN, PATCH_USERNAME_COLUMN, PATCH_VALUE_COLUMN};
use crate::error::MergeResult;
use crate::quoted::QuotedCsv;
use std::path::Path;

/// Overlay the patch file at `path` onto `acc`.
///
/// Each row sets `acc[Username][Caption] = Value`, creating the user when
/// needed. Rows are applied in file order, so a later row for the same cell
/// wins. Rows missing one of the three fields, or with a blank username, are
/// skipped. `headers` is only consulted to flag captions that will not
/// appear in the output.
pub fn apply_patch(
    acc: &mut Accumulator,
    path: &Path,
    headers: &[String],
    stats: &mut MergeStats,
) -> MergeResult<()> {
    let csv = QuotedCsv::open(path)?;

    for record in csv.dict_reader()? {
        let record = record?;
        let fields = (
            record.supplied(PATCH_USERNAME_COLUMN),
            record.supplied(PATCH_CAPTION_COLUMN),
            record.supplied(PATCH_VALUE_COLUMN),
        );
        let (Some(username), Some(caption), Some(value)) = fields else {
            tracing::warn!(
                "{}:{}: patch row needs {}, {} and {}; skipped",
                path.display(),
                record.line(),
                PATCH_USERNAME_COLUMN,
                PATCH_CAPTION_COLUMN,
                PATCH_VALUE_COLUMN
            );
            stats.patch_rows_skipped += 1;
            continue;
        };
        if username.trim().is_empty() {
            tracing::warn!("{}:{}: blank username in patch row; skipped", path.display(), record.line());
            stats.patch_rows_skipped += 1;
            continue;
        }

        if !headers.iter().any(|h| h == caption) {
            tracing::warn!(
                "{}:{}: caption '{}' is not an output column; value kept but not emitted",
                path.display(),
                record.line(),
                caption
            );
        }

        if !acc.contains(username) {
            tracing::debug!("{}:{}: patch adds new user '{}'", path.display(), record.line(), username);
        }
        match acc.set(username, caption, value) {
            Some(previous) => tracing::info!(
                "Patched {} / {}: '{}' -> '{}'",
                username,
                caption,
                previous,
                value
            ),
            None => tracing::info!("Patched {} / {}: (unset) -> '{}'", username, caption, value),
        }
        stats.patch_rows_applied += 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn headers() -> Vec<String> {
        vec!["Username".into(), "A".into(), "B".into()]
    }

    fn patch_file(dir: &Path, content: &str) -> std::path::PathBuf {
        let path = dir.join("patch_1.csv");
        fs::write(&path, content).expect("write");
        path
    }

    #[test]
    fn patch_overrides_merged_value() {
        let tmp = TempDir::new().expect("tmp");
        let path = patch_file(tmp.path(), "Username,Caption,Value\nalice,A,99\n");
        let mut acc = Accumulator::new();
        acc.set("alice", "A", "10");
        let mut stats = MergeStats::default();

        apply_patch(&mut acc, &path, &headers(), &mut stats).expect("patch");

        assert_eq!(acc.get("alice", "A"), Some("99"));
        assert_eq!(stats.patch_rows_applied, 1);
    }

    #[test]
    fn patch_creates_unknown_users_at_the_end() {
        let tmp = TempDir::new().expect("tmp");
        let path = patch_file(tmp.path(), "Username,Caption,Value\nzed,B,1\n");
        let mut acc = Accumulator::new();
        acc.set("alice", "A", "10");

        apply_patch(&mut acc, &path, &headers(), &mut MergeStats::default()).expect("patch");

        assert_eq!(acc.usernames().collect::<Vec<_>>(), ["alice", "zed"]);
        assert_eq!(acc.get("zed", "B"), Some("1"));
    }

    #[test]
    fn later_patch_rows_win() {
        let tmp = TempDir::new().expect("tmp");
        let path = patch_file(tmp.path(), "Username,Caption,Value\nbob,B,1\nbob,B,2\n");
        let mut acc = Accumulator::new();

        apply_patch(&mut acc, &path, &headers(), &mut MergeStats::default()).expect("patch");

        assert_eq!(acc.get("bob", "B"), Some("2"));
    }

    #[test]
    fn incomplete_rows_are_skipped_without_aborting() {
        let tmp = TempDir::new().expect("tmp");
        let path = patch_file(tmp.path(), "Username,Caption,Value\nbob,B\n  ,A,3\ncarol,A,\n");
        let mut acc = Accumulator::new();
        let mut stats = MergeStats::default();

        apply_patch(&mut acc, &path, &headers(), &mut stats).expect("patch");

        assert_eq!(stats.patch_rows_skipped, 2);
        assert_eq!(stats.patch_rows_applied, 1);
        assert!(!acc.contains("bob"));
        assert_eq!(acc.get("carol", "A"), Some(""));
    }

    #[test]
    fn wrong_patch_header_skips_every_row() {
        let tmp = TempDir::new().expect("tmp");
        let path = patch_file(tmp.path(), "User,Column,Value\nbob,B,1\n");
        let mut acc = Accumulator::new();
        let mut stats = MergeStats::default();

        apply_patch(&mut acc, &path, &headers(), &mut stats).expect("patch");

        assert!(acc.is_empty());
        assert_eq!(stats.patch_rows_skipped, 1);
    }
}
