//! Presence probes.
//!
//! Each desired item carries one [`Probe`]. A probe only answers "is it
//! there?"; it never installs or mutates anything.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use sha2::{Digest, Sha256};

use crate::catalog::PackageNames;
use crate::host::Host;
use crate::shell::shell_quote;

use super::PackageManager;

/// Detection strategy for a desired item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// An executable with this name is on the search path.
    OnPath(String),
    /// The detected manager's package database lists the package.
    PackageInstalled(PackageNames),
    /// A file or directory exists.
    PathExists(PathBuf),
    /// The file exists and its SHA-256 matches `digest`.
    ContentHash { path: PathBuf, digest: String },
    /// The file exists and contains `line` as a substring.
    ContainsLine { path: PathBuf, line: String },
    /// Every `(key, value)` is set in the global git config.
    GitConfig(Vec<(String, String)>),
}

impl Probe {
    /// Evaluate the probe against the live system.
    ///
    /// Probes that cannot be evaluated (no package manager, no `git`)
    /// report absent; the install action then decides whether that is
    /// actionable.
    pub fn is_present(&self, host: &dyn Host, manager: Option<PackageManager>) -> bool {
        let present = match self {
            Probe::OnPath(tool) => host.which(tool).is_some(),
            Probe::PackageInstalled(names) => package_installed(host, manager, names),
            Probe::PathExists(path) => path.exists(),
            Probe::ContentHash { path, digest } => fs::read(path)
                .map(|bytes| content_digest(&bytes) == *digest)
                .unwrap_or(false),
            Probe::ContainsLine { path, line } => fs::read(path)
                .map(|content| contains_bytes(&content, line.as_bytes()))
                .unwrap_or(false),
            Probe::GitConfig(settings) => {
                host.which("git").is_some()
                    && settings
                        .iter()
                        .all(|(key, value)| git_config_matches(host, key, value))
            }
        };
        tracing::debug!("Probe {} -> {}", self, if present { "present" } else { "absent" });
        present
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Probe::OnPath(tool) => write!(f, "on PATH: {}", tool),
            Probe::PackageInstalled(names) => write!(f, "package installed ({})", names.describe()),
            Probe::PathExists(path) => write!(f, "exists: {}", path.display()),
            Probe::ContentHash { path, digest } => {
                write!(f, "sha256 {} of {}", &digest[..digest.len().min(12)], path.display())
            }
            Probe::ContainsLine { path, .. } => write!(f, "line present in {}", path.display()),
            Probe::GitConfig(settings) => {
                let keys: Vec<&str> = settings.iter().map(|(k, _)| k.as_str()).collect();
                write!(f, "git config {}", keys.join(", "))
            }
        }
    }
}

/// Hex-encoded SHA-256 of `bytes`.
pub fn content_digest(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(&digest[..])
}

/// Whether `needle` occurs anywhere in `haystack`.
///
/// Dotfiles are not guaranteed to be UTF-8, so line checks work on bytes.
pub fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

/// Whether the manager's package database lists the package.
pub fn package_installed(
    host: &dyn Host,
    manager: Option<PackageManager>,
    names: &PackageNames,
) -> bool {
    let Some(manager) = manager else {
        return false;
    };
    let Some(package) = names.for_manager(manager) else {
        return false;
    };
    host.run(&manager.query_command(package))
        .map(|result| manager.is_installed(&result))
        .unwrap_or(false)
}

/// Current global value of a git config key, if set.
pub fn git_config_get(host: &dyn Host, key: &str) -> Option<String> {
    let command = format!("git config --global --get {}", shell_quote(key));
    host.run(&command)
        .ok()
        .filter(|result| result.success)
        .map(|result| result.stdout.trim_end_matches(['\n', '\r']).to_string())
}

fn git_config_matches(host: &dyn Host, key: &str, value: &str) -> bool {
    git_config_get(host, key).as_deref() == Some(value)
}
