//! JSON output of a run's digest.
//!
//! # Output Structure
//!
//! Files are organized by date, one file per run named after its time:
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── 08-00-12.json
//!     └── 14-30-05.json
//! ```

use crate::models::{Digest, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Path a digest generated at `generated_at` is written to under `json_output_dir`.
pub fn digest_path(json_output_dir: &str, generated_at: &str) -> Result<PathBuf, Box<dyn Error>> {
    let generated = NaiveDateTime::parse_from_str(generated_at, TIMESTAMP_FORMAT)?;
    Ok(Path::new(json_output_dir)
        .join(generated.format("%Y-%m-%d").to_string())
        .join(format!("{}.json", generated.format("%H-%M-%S"))))
}

/// Write a [`Digest`] to a JSON file with date-based directory structure.
///
/// # Returns
///
/// The path written, or an error if directory creation or the write fails.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_digest(digest: &Digest, json_output_dir: &str) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(digest)?;
    let path = digest_path(json_output_dir, &digest.generated_at)?;

    if let Some(dir) = path.parent() {
        info!(dir = %dir.display(), "Ensuring JSON directory exists");
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(&path, json).await?;
    info!(path = %path.display(), articles = digest.articles.len(), "Wrote JSON digest");

    Ok(path)
}
