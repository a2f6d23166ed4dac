//! Turn schema items into catalog items.
//!
//! Resolution expands `~` against the provisioned home, reads `source:`
//! fragments and builds the probe each item kind implies.

use std::fs;
use std::path::Path;

use crate::catalog::{builtin, Action, DesiredItem, Fallback, PackageNames};
use crate::config::schema::{FallbackConfig, ItemConfig, ProbeConfig};
use crate::detection::{content_digest, Probe};
use crate::error::{RigupError, Result};
use crate::sys::expand_home;

/// Where `source:` paths of a layer are looked up.
#[derive(Debug, Clone, Copy)]
pub enum ContentSource<'a> {
    /// The embedded catalog directory.
    Embedded,
    /// The directory of the declaring file.
    Dir(&'a Path),
}

/// Resolve one configured item against `home`.
pub fn resolve_item(
    item: &ItemConfig,
    home: &Path,
    source: ContentSource<'_>,
) -> Result<DesiredItem> {
    let name = item.name().to_string();

    let (probe, action) = match item {
        ItemConfig::Package {
            package,
            apt,
            dnf,
            probe,
            fallback,
            ..
        } => {
            let names = PackageNames {
                apt: apt.clone().or_else(|| package.clone()),
                dnf: dnf.clone().or_else(|| package.clone()),
            };
            let probe = match probe {
                None | Some(ProbeConfig::Package) => Probe::PackageInstalled(names.clone()),
                Some(ProbeConfig::OnPath { command }) => Probe::OnPath(command.clone()),
                Some(ProbeConfig::PathExists { path }) => Probe::PathExists(expand_home(path, home)),
            };
            let fallback = fallback.as_ref().map(|f| resolve_fallback(f, home));
            (probe, Action::Package { names, fallback })
        }
        ItemConfig::Font { url, dir, files, .. } => {
            let dir = expand_home(dir, home);
            let first = files.first().ok_or_else(|| RigupError::ConfigValidationError {
                message: format!("Font '{}' must list at least one file", name),
            })?;
            (
                Probe::PathExists(dir.join(first)),
                Action::Font {
                    url: url.clone(),
                    dir,
                    files: files.clone(),
                },
            )
        }
        ItemConfig::ConfigFile {
            path,
            content,
            source: fragment,
            ..
        } => {
            let path = expand_home(path, home);
            let content = match (content, fragment) {
                (Some(content), _) => content.clone(),
                (None, Some(fragment)) => read_fragment(fragment, home, source)?,
                (None, None) => {
                    return Err(RigupError::ConfigValidationError {
                        message: format!(
                            "Config file '{}' needs exactly one of 'content' or 'source'",
                            name
                        ),
                    })
                }
            };
            (
                Probe::ContentHash {
                    path: path.clone(),
                    digest: content_digest(content.as_bytes()),
                },
                Action::ConfigFile { path, content },
            )
        }
        ItemConfig::SourceLine { file, line, .. } => {
            let file = expand_home(file, home);
            (
                Probe::ContainsLine {
                    path: file.clone(),
                    line: line.clone(),
                },
                Action::SourceLine {
                    file,
                    line: line.clone(),
                },
            )
        }
        ItemConfig::GitConfig { settings, .. } => {
            let settings = settings
                .iter()
                .map(|(key, value)| -> Result<(String, String)> {
                    Ok((scalar_to_string(&name, key)?, scalar_to_string(&name, value)?))
                })
                .collect::<Result<Vec<_>>>()?;
            (
                Probe::GitConfig(settings.clone()),
                Action::GitConfig { settings },
            )
        }
    };

    Ok(DesiredItem {
        name,
        probe,
        action,
    })
}

fn resolve_fallback(fallback: &FallbackConfig, home: &Path) -> Fallback {
    match fallback {
        FallbackConfig::Release { url, binary, dest } => Fallback::Release {
            url: url.clone(),
            binary: binary.clone(),
            dest: expand_home(dest, home),
        },
        FallbackConfig::Script { url, args } => Fallback::Script {
            url: url.clone(),
            args: args
                .iter()
                .map(|arg| expand_home(arg, home).to_string_lossy().into_owned())
                .collect(),
        },
    }
}

fn read_fragment(fragment: &str, home: &Path, source: ContentSource<'_>) -> Result<String> {
    match source {
        ContentSource::Embedded => builtin::fragment(fragment)
            .map(str::to_string)
            .ok_or_else(|| RigupError::ConfigNotFound {
                path: Path::new("catalog").join(fragment),
            }),
        ContentSource::Dir(dir) => {
            // Absolute and `~` paths replace `dir` on join.
            let path = dir.join(expand_home(fragment, home));
            fs::read_to_string(&path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RigupError::ConfigNotFound { path }
                } else {
                    RigupError::Io(e)
                }
            })
        }
    }
}

fn scalar_to_string(item: &str, value: &serde_yaml::Value) -> Result<String> {
    match value {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        other => Err(RigupError::ConfigValidationError {
            message: format!(
                "Git config '{}' has a non-scalar entry: {:?}",
                item, other
            ),
        }),
    }
}
