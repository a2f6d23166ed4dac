//! Package manager detection.
//!
//! Two families are supported: apt (Debian, Ubuntu) and dnf (Fedora, RHEL).
//! Detection is a capability probe for the manager's executable; the result
//! is computed once per run and carried in the run context.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::host::Host;
use crate::shell::{shell_quote, CommandResult};

/// Detected package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Apt,
    Dnf,
}

/// Manager selection from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManagerSetting {
    /// Probe PATH for a supported manager.
    #[default]
    Auto,
    Apt,
    Dnf,
    /// Pretend no manager exists; only fallbacks run.
    None,
}

impl PackageManager {
    /// Probe order. The first executable found wins.
    const PROBE_ORDER: [(PackageManager, &'static str); 2] =
        [(PackageManager::Apt, "apt-get"), (PackageManager::Dnf, "dnf")];

    /// Detect the system package manager by probing for its executable.
    pub fn detect(host: &dyn Host) -> Option<PackageManager> {
        for (manager, binary) in Self::PROBE_ORDER {
            if let Some(path) = host.which(binary) {
                tracing::debug!("Detected {} at {}", manager, path.display());
                return Some(manager);
            }
        }
        tracing::debug!("No supported package manager on PATH");
        None
    }

    /// Resolve the configured selection, probing only for `auto`.
    pub fn select(setting: ManagerSetting, host: &dyn Host) -> Option<PackageManager> {
        match setting {
            ManagerSetting::Auto => Self::detect(host),
            ManagerSetting::Apt => Some(PackageManager::Apt),
            ManagerSetting::Dnf => Some(PackageManager::Dnf),
            ManagerSetting::None => None,
        }
    }

    /// Lowercase manager name.
    pub fn name(&self) -> &'static str {
        match self {
            PackageManager::Apt => "apt",
            PackageManager::Dnf => "dnf",
        }
    }

    /// Command that queries the package database for `package`.
    pub fn query_command(&self, package: &str) -> String {
        match self {
            PackageManager::Apt => {
                format!("dpkg-query -W -f='${{Status}}' {}", shell_quote(package))
            }
            PackageManager::Dnf => format!("rpm -q {}", shell_quote(package)),
        }
    }

    /// Interpret the result of [`query_command`](Self::query_command).
    pub fn is_installed(&self, result: &CommandResult) -> bool {
        match self {
            // dpkg keeps records for removed packages, so exit 0 is not enough.
            PackageManager::Apt => {
                result.success && result.stdout.contains("install ok installed")
            }
            PackageManager::Dnf => result.success,
        }
    }

    /// Command that installs `package` non-interactively.
    pub fn install_command(&self, package: &str, sudo: bool) -> String {
        let base = match self {
            PackageManager::Apt => {
                format!(
                    "env DEBIAN_FRONTEND=noninteractive apt-get install -y {}",
                    shell_quote(package)
                )
            }
            PackageManager::Dnf => format!("dnf install -y {}", shell_quote(package)),
        };
        with_sudo(&base, sudo)
    }

    /// Command that refreshes the package index before the first install.
    pub fn refresh_command(&self, sudo: bool) -> Option<String> {
        match self {
            PackageManager::Apt => Some(with_sudo("apt-get update", sudo)),
            PackageManager::Dnf => None,
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn with_sudo(command: &str, sudo: bool) -> String {
    if sudo {
        format!("sudo {}", command)
    } else {
        command.to_string()
    }
}
