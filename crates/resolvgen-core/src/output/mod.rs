//! Output file lifecycle.
//!
//! Rows are written to `<output>.part`, synced, then atomically renamed onto
//! the final path, so an interrupted run never leaves a truncated CSV behind.

mod dialect;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::GenerateError;
use crate::record::OutputRecord;

pub use dialect::write_csv;

/// Default output file name (relative to the working directory).
pub const DEFAULT_OUTPUT_FILE: &str = "dnscrypt-resolvers.csv";

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Writes `records` as CSV to `final_path`. The temp file is removed on failure.
pub fn write_records(final_path: &Path, records: &[OutputRecord]) -> Result<(), GenerateError> {
    let tmp = temp_path(final_path);
    let result = write_then_rename(&tmp, final_path, records);
    if result.is_err() && tmp.exists() {
        if let Err(e) = std::fs::remove_file(&tmp) {
            tracing::warn!("failed to remove temp file {}: {}", tmp.display(), e);
        }
    }
    result
}

fn write_then_rename(
    tmp: &Path,
    final_path: &Path,
    records: &[OutputRecord],
) -> Result<(), GenerateError> {
    let file = File::create(tmp).map_err(|e| GenerateError::write(tmp, e))?;
    let mut out = BufWriter::new(file);
    write_csv(&mut out, records).map_err(|e| GenerateError::write(tmp, e.into()))?;
    let file = out
        .into_inner()
        .map_err(|e| GenerateError::write(tmp, e.into_error()))?;
    file.sync_all().map_err(|e| GenerateError::write(tmp, e))?;
    drop(file);

    std::fs::rename(tmp, final_path).map_err(|e| GenerateError::write(final_path, e))?;
    tracing::debug!("renamed {} -> {}", tmp.display(), final_path.display());
    Ok(())
}
