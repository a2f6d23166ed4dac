//! Production [`Host`] backed by the real PATH, `/bin/sh` and HTTP.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{RigupError, Result};
use crate::fetch::HttpFetcher;
use crate::shell::{execute, CommandOptions, CommandResult};
use crate::sys::{parse_system_path, resolve_tool_path};

use super::Host;

/// The live system.
pub struct SystemHost {
    extra_path: Vec<PathBuf>,
    fetcher: HttpFetcher,
}

impl SystemHost {
    /// Create a host for provisioning `home`.
    ///
    /// `~/.local/bin` is searched after the system PATH even when the
    /// invoking shell has not added it yet, so binaries installed there by a
    /// previous run are found again.
    pub fn new(home: &Path, download_timeout: Duration) -> Result<Self> {
        let fetcher = HttpFetcher::with_timeout(download_timeout)?;
        Ok(Self {
            extra_path: vec![home.join(".local/bin")],
            fetcher,
        })
    }

    /// Combined search path: system PATH followed by the extra entries.
    pub fn search_path(&self) -> Vec<PathBuf> {
        let mut path = parse_system_path();
        for extra in &self.extra_path {
            if !path.contains(extra) {
                path.push(extra.clone());
            }
        }
        path
    }
}

impl Host for SystemHost {
    fn which(&self, tool: &str) -> Option<PathBuf> {
        // PATH is re-read on every call; installs can add entries mid-run.
        resolve_tool_path(tool, &self.search_path())
    }

    fn run(&self, command: &str) -> Result<CommandResult> {
        let mut options = CommandOptions {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        };
        // Children see the same search path as `which`.
        if let Ok(path) = std::env::join_paths(self.search_path()) {
            options
                .env
                .insert("PATH".to_string(), path.to_string_lossy().into_owned());
        }

        let result = execute(command, &options)?;
        if !result.success {
            tracing::debug!("{} stderr: {}", command, result.stderr.trim());
        }
        Ok(result)
    }

    fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        self.fetcher
            .download_to(url, dest)
            .map_err(|e| RigupError::DownloadFailed {
                url: url.to_string(),
                message: format!("{:#}", e),
            })
    }
}
