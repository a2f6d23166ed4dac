//! Archive extraction via the system `tar`.

use std::path::Path;
use std::process::Command;

use crate::error::{RigupError, Result};

/// Extract a tarball into `dest_dir`.
///
/// `tar -xf` detects gzip, xz, bzip2 and zstd compression from the file
/// itself, so `.tar.gz`, `.tgz` and `.tar.xz` all take the same path.
/// Zip archives are handed to `unzip`.
pub fn extract_archive(archive_path: &Path, dest_dir: &Path) -> Result<()> {
    let name = archive_path.to_string_lossy();

    let output = if name.ends_with(".zip") {
        Command::new("unzip")
            .arg("-o")
            .arg("-q")
            .arg(archive_path)
            .arg("-d")
            .arg(dest_dir)
            .output()
    } else {
        Command::new("tar")
            .arg("-xf")
            .arg(archive_path)
            .arg("-C")
            .arg(dest_dir)
            .output()
    };

    let output = output.map_err(|e| RigupError::ArchiveFailed {
        archive: name.to_string(),
        message: e.to_string(),
    })?;

    if !output.status.success() {
        return Err(RigupError::ArchiveFailed {
            archive: name.to_string(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    tracing::debug!("Extracted {} into {}", name, dest_dir.display());
    Ok(())
}

/// Whether a download URL points at an archive rather than a bare file.
///
/// Only the file name is checked, so query strings and fragments are ignored.
pub fn is_archive(url: &str) -> bool {
    const SUFFIXES: &[&str] = &[
        ".tar.gz", ".tgz", ".tar.xz", ".txz", ".tar.bz2", ".tar.zst", ".zip",
    ];
    let name = file_name_from_url(url);
    SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// File name component of a download URL, ignoring any query string.
pub fn file_name_from_url(url: &str) -> &str {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    without_query
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or("download")
}
