use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::BatchError;
use crate::record::QuestionRecord;

const RESULTS_PREFIX: &str = "batch_test_results_";

/// `batch_test_results_<YYYYMMDD_HHMMSS>.json` for the given UTC instant.
pub fn results_file_name(started_at: &DateTime<Utc>) -> String {
    format!("{RESULTS_PREFIX}{}.json", started_at.format("%Y%m%d_%H%M%S"))
}

/// Writes `records` as a pretty JSON array into `dir`, named after
/// `started_at`, and returns the path written.
pub fn write_results(
    dir: &Path,
    started_at: &DateTime<Utc>,
    records: &[QuestionRecord],
) -> Result<PathBuf, BatchError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(results_file_name(started_at));
    let payload = serde_json::to_vec_pretty(records)?;
    fs::write(&path, payload)?;
    Ok(path)
}
