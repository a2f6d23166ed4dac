//! Explicit run state shared by every item handler.

use std::path::{Path, PathBuf};

use crate::detection::PackageManager;
use crate::host::Host;

/// Everything an item handler needs to know about the machine it runs on.
///
/// Built once per run after package-manager detection and passed by
/// reference to every handler.
pub struct RunContext<'a> {
    /// System seam: PATH lookup, commands, downloads.
    pub host: &'a dyn Host,
    /// Selected package manager, `None` when neither apt nor dnf is usable.
    pub manager: Option<PackageManager>,
    /// Home directory being provisioned.
    pub home: PathBuf,
    /// Prefix manager commands with `sudo`.
    pub sudo: bool,
}

impl<'a> RunContext<'a> {
    /// Create a run context.
    pub fn new(
        host: &'a dyn Host,
        manager: Option<PackageManager>,
        home: impl Into<PathBuf>,
        sudo: bool,
    ) -> Self {
        Self {
            host,
            manager,
            home: home.into(),
            sudo,
        }
    }

    /// Home directory being provisioned.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// `~/.local/bin` of the provisioned home.
    pub fn local_bin(&self) -> PathBuf {
        self.home.join(".local/bin")
    }
}

/// Options for a reconciliation pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Stop at the first failed item; later items are not attempted.
    pub fail_fast: bool,
    /// Probe only; report what would change without changing it.
    pub check_only: bool,
}

/// Bookkeeping that item handlers update during a run.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    /// `apt-get update` has run (or been attempted) this run.
    pub index_refreshed: bool,
    /// Font items installed this run, in order.
    pub fonts_installed: Vec<String>,
    /// Non-item warnings collected along the way.
    pub warnings: Vec<String>,
}
