//! Copies finished reports to a shared directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::{AgingError, AgingResult};

fn publish_error(path: &Path, message: impl ToString) -> AgingError {
    AgingError::Publish {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

/// Copies each named file from `source_dir` into `dest_dir`.
///
/// Both directories must exist. Files are copied in order and existing
/// files in the destination are overwritten. Returns the destination paths.
///
/// # Errors
///
/// Returns [`AgingError::Publish`] for a missing directory or for the first
/// file that cannot be copied. Files copied before the failure stay in
/// place.
pub fn publish_reports<S: AsRef<str>>(
    source_dir: &Path,
    dest_dir: &Path,
    file_names: &[S],
) -> AgingResult<Vec<PathBuf>> {
    for dir in [source_dir, dest_dir] {
        if !dir.is_dir() {
            error!(path = %dir.display(), "Publish directory does not exist");
            return Err(publish_error(dir, "directory does not exist"));
        }
    }

    let mut published = Vec::with_capacity(file_names.len());
    for name in file_names {
        let name = name.as_ref();
        let source = source_dir.join(name);
        let destination = dest_dir.join(name);

        if let Err(e) = fs::copy(&source, &destination) {
            error!(file = name, source = %source.display(), error = %e, "Failed to publish report");
            return Err(publish_error(&source, e));
        }
        info!(
            file = name,
            from = %source_dir.display(),
            to = %dest_dir.display(),
            "Published report"
        );
        published.push(destination);
    }
    Ok(published)
}
