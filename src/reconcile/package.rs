//! Package items: manager install, fallback install, or an actionable warning.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::archive::{extract_archive, file_name_from_url, is_archive};
use crate::catalog::{Fallback, PackageNames};
use crate::detection::{PackageManager, Probe};
use crate::error::{RigupError, Result};
use crate::shell::shell_quote;
use crate::sys::{find_file_named, make_executable};

use super::context::{RunContext, RunState};
use super::outcome::Outcome;

/// How an absent package would be installed on this machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallPlan<'a> {
    /// Install through the detected manager.
    Manager {
        manager: PackageManager,
        package: &'a str,
    },
    /// No manager entry applies; use the manual install.
    Fallback(&'a Fallback),
    /// Nothing can install it here.
    Unavailable(String),
}

/// Decide how to install a package item.
pub fn plan<'a>(
    ctx: &RunContext<'_>,
    name: &str,
    names: &'a PackageNames,
    fallback: Option<&'a Fallback>,
) -> InstallPlan<'a> {
    if let Some(manager) = ctx.manager {
        if let Some(package) = names.for_manager(manager) {
            return InstallPlan::Manager { manager, package };
        }
    }
    if let Some(fallback) = fallback {
        return InstallPlan::Fallback(fallback);
    }

    let reason = match ctx.manager {
        None => RigupError::NoPackageManager {
            packages: if names.is_empty() {
                name.to_string()
            } else {
                names.describe()
            },
        }
        .to_string(),
        Some(manager) => format!(
            "No {} package is configured for '{}' and it has no fallback; add an '{}:' name or install it manually",
            manager, name, manager
        ),
    };
    InstallPlan::Unavailable(reason)
}

/// Describe the plan without running it.
pub fn preview(
    ctx: &RunContext<'_>,
    name: &str,
    names: &PackageNames,
    fallback: Option<&Fallback>,
) -> Outcome {
    match plan(ctx, name, names, fallback) {
        InstallPlan::Manager { manager, package } => Outcome::Pending {
            detail: format!("would install {} via {}", package, manager),
        },
        InstallPlan::Fallback(fallback) => Outcome::Pending {
            detail: format!("would install from {}", fallback.describe()),
        },
        InstallPlan::Unavailable(reason) => Outcome::Unavailable { reason },
    }
}

/// Install an absent package item, then re-probe to confirm.
pub fn install(
    ctx: &RunContext<'_>,
    state: &mut RunState,
    name: &str,
    probe: &Probe,
    names: &PackageNames,
    fallback: Option<&Fallback>,
) -> Result<Outcome> {
    let detail = match plan(ctx, name, names, fallback) {
        InstallPlan::Unavailable(reason) => {
            tracing::warn!("{}: {}", name, reason);
            return Ok(Outcome::Unavailable { reason });
        }
        InstallPlan::Manager { manager, package } => {
            install_with_manager(ctx, state, manager, package)?;
            format!("installed {} via {}", package, manager)
        }
        InstallPlan::Fallback(fallback) => {
            install_fallback(ctx, fallback)?;
            format!("installed from {}", fallback.describe())
        }
    };

    if !probe.is_present(ctx.host, ctx.manager) {
        return Ok(Outcome::Failed {
            error: format!("{} but it is still not detected ({})", detail, probe),
        });
    }

    tracing::info!("{}: {}", name, detail);
    Ok(Outcome::Changed { detail })
}

fn install_with_manager(
    ctx: &RunContext<'_>,
    state: &mut RunState,
    manager: PackageManager,
    package: &str,
) -> Result<()> {
    if !state.index_refreshed {
        if let Some(refresh) = manager.refresh_command(ctx.sudo) {
            state.index_refreshed = true;
            let result = ctx.host.run(&refresh)?;
            if !result.success {
                let warning = format!(
                    "'{}' exited with {:?}; installing from the existing package index",
                    refresh, result.exit_code
                );
                tracing::warn!("{}", warning);
                state.warnings.push(warning);
            }
        }
    }

    let command = manager.install_command(package, ctx.sudo);
    ctx.host.run(&command)?.into_checked(&command)?;
    Ok(())
}

fn install_fallback(ctx: &RunContext<'_>, fallback: &Fallback) -> Result<()> {
    let temp = TempDir::new()?;

    match fallback {
        Fallback::Release { url, binary, dest } => {
            let download = temp.path().join(file_name_from_url(url));
            ctx.host.download(url, &download)?;

            let source = if is_archive(url) {
                let unpacked = temp.path().join("unpacked");
                fs::create_dir_all(&unpacked)?;
                extract_archive(&download, &unpacked)?;
                find_file_named(&unpacked, binary).ok_or_else(|| RigupError::ArchiveFailed {
                    archive: url.clone(),
                    message: format!("no file named '{}' in archive", binary),
                })?
            } else {
                download
            };

            install_binary(&source, &dest.join(binary))
        }
        Fallback::Script { url, args } => {
            // Install scripts are pointed at ~/.local/bin and refuse a missing directory.
            let local_bin = ctx.local_bin();
            fs::create_dir_all(&local_bin).map_err(|e| RigupError::WriteFailed {
                path: local_bin.clone(),
                source: e,
            })?;

            let script = temp.path().join("install.sh");
            ctx.host.download(url, &script)?;

            let mut command = format!("sh {}", shell_quote(&script.to_string_lossy()));
            for arg in args {
                command.push(' ');
                command.push_str(&shell_quote(arg));
            }
            ctx.host.run(&command)?.into_checked(&command)?;
            Ok(())
        }
    }
}

fn install_binary(source: &Path, target: &Path) -> Result<()> {
    let write_failed = |err| RigupError::WriteFailed {
        path: target.to_path_buf(),
        source: err,
    };
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }
    fs::copy(source, target).map_err(write_failed)?;
    make_executable(target).map_err(write_failed)?;
    tracing::debug!("Installed {} to {}", source.display(), target.display());
    Ok(())
}
