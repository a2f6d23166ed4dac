//! Built-in catalog embedded at compile time.

use include_dir::{include_dir, Dir};

use crate::error::{RigupError, Result};

/// Embedded catalog directory.
static CATALOG_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/catalog");

/// Name of the catalog file inside the embedded directory.
pub const CATALOG_FILE: &str = "catalog.yml";

/// Raw YAML of the built-in catalog.
pub fn catalog_yaml() -> Result<&'static str> {
    let file = CATALOG_DIR
        .get_file(CATALOG_FILE)
        .ok_or_else(|| RigupError::ConfigNotFound {
            path: format!("catalog/{}", CATALOG_FILE).into(),
        })?;

    file.contents_utf8()
        .ok_or_else(|| RigupError::ConfigParseError {
            path: format!("catalog/{}", CATALOG_FILE).into(),
            message: "Invalid UTF-8".to_string(),
        })
}

/// Content of an embedded fragment, by path relative to the catalog dir.
pub fn fragment(path: &str) -> Option<&'static str> {
    CATALOG_DIR
        .get_file(path.trim_start_matches("./"))
        .and_then(|file| file.contents_utf8())
}
