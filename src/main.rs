//! csv-merge: merge the latest CSV snapshots described by a configuration file.

use anyhow::Result;

fn main() -> Result<()> {
    csv_merge::cli::run()
}
