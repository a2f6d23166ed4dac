//! Config-file items: write exact content when the on-disk hash differs.

use std::fs;
use std::path::Path;

use crate::error::{RigupError, Result};

use super::outcome::Outcome;

/// Write `content` to `path`, creating parent directories.
///
/// Only called after the content-hash probe reported a mismatch.
pub fn apply(path: &Path, content: &str) -> Result<Outcome> {
    let existed = path.exists();
    let write_failed = |err| RigupError::WriteFailed {
        path: path.to_path_buf(),
        source: err,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }
    fs::write(path, content).map_err(write_failed)?;

    let detail = format!(
        "{} {}",
        if existed { "updated" } else { "created" },
        path.display()
    );
    tracing::info!("{}", detail);
    Ok(Outcome::Changed { detail })
}

/// Describe what a write would do.
pub fn preview(path: &Path) -> Outcome {
    Outcome::Pending {
        detail: format!(
            "would {} {}",
            if path.exists() { "update" } else { "create" },
            path.display()
        ),
    }
}
