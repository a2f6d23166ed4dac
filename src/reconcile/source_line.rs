//! Source-line items: append a directive to a parent file exactly once.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::detection::contains_bytes;
use crate::error::{RigupError, Result};

use super::outcome::Outcome;

/// Append `line` to `file` unless it is already there.
///
/// The line always lands on its own line: a newline is written first when
/// the file does not end with one. A missing file is created.
pub fn apply(file: &Path, line: &str) -> Result<Outcome> {
    let existing = match fs::read(file) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(RigupError::Io(e)),
    };

    if existing
        .as_deref()
        .is_some_and(|content| contains_bytes(content, line.as_bytes()))
    {
        return Ok(Outcome::Satisfied);
    }

    let mut text = String::new();
    if existing
        .as_deref()
        .is_some_and(|content| !content.is_empty() && !content.ends_with(b"\n"))
    {
        text.push('\n');
    }
    text.push_str(line);
    text.push('\n');

    let write_failed = |err| RigupError::WriteFailed {
        path: file.to_path_buf(),
        source: err,
    };
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }
    let mut handle = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)
        .map_err(write_failed)?;
    handle.write_all(text.as_bytes()).map_err(write_failed)?;

    let detail = format!(
        "{} {}",
        if existing.is_some() { "appended to" } else { "created" },
        file.display()
    );
    tracing::info!("{}", detail);
    Ok(Outcome::Changed { detail })
}

/// Describe what an append would do.
pub fn preview(file: &Path) -> Outcome {
    Outcome::Pending {
        detail: format!("would append to {}", file.display()),
    }
}
