//! The desired state: items to reconcile and how to install them.
//!
//! A [`Catalog`] is an ordered list of [`DesiredItem`]s. Items are
//! independent of each other; the only ordering is catalog order. The
//! built-in catalog is embedded at compile time (see [`builtin`]) and can be
//! extended or trimmed by configuration files.

pub mod builtin;

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::detection::{PackageManager, Probe};

/// One thing the workstation should have.
#[derive(Debug, Clone)]
pub struct DesiredItem {
    /// Unique name, used in output and for `--only`/`--skip`.
    pub name: String,
    /// How to tell whether the item is already present.
    pub probe: Probe,
    /// What to do when it is not.
    pub action: Action,
}

impl DesiredItem {
    /// The item's kind.
    pub fn kind(&self) -> ItemKind {
        self.action.kind()
    }
}

/// Install action for a desired item.
#[derive(Debug, Clone)]
pub enum Action {
    /// A system package, with an optional manual install when no manager applies.
    Package {
        names: PackageNames,
        fallback: Option<Fallback>,
    },
    /// A font family downloaded as an archive.
    Font {
        url: String,
        dir: PathBuf,
        /// Files that must exist in `dir` afterwards. The first one is probed.
        files: Vec<String>,
    },
    /// A file whose content must equal `content` exactly.
    ConfigFile { path: PathBuf, content: String },
    /// A directive that must appear once in a parent file.
    SourceLine { file: PathBuf, line: String },
    /// Global git settings.
    GitConfig { settings: Vec<(String, String)> },
}

impl Action {
    /// The kind of this action.
    pub fn kind(&self) -> ItemKind {
        match self {
            Action::Package { .. } => ItemKind::Package,
            Action::Font { .. } => ItemKind::Font,
            Action::ConfigFile { .. } => ItemKind::ConfigFile,
            Action::SourceLine { .. } => ItemKind::SourceLine,
            Action::GitConfig { .. } => ItemKind::GitConfig,
        }
    }

    /// One-line description of what reconciling does.
    pub fn describe(&self) -> String {
        match self {
            Action::Package { names, fallback } => match (names.is_empty(), fallback) {
                (false, Some(fallback)) => {
                    format!("{}; else {}", names.describe(), fallback.describe())
                }
                (true, Some(fallback)) => fallback.describe(),
                (_, None) => names.describe(),
            },
            Action::Font { url, dir, .. } => format!("{} into {}", url, dir.display()),
            Action::ConfigFile { path, .. } => format!("write {}", path.display()),
            Action::SourceLine { file, .. } => format!("append to {}", file.display()),
            Action::GitConfig { settings } => {
                let keys: Vec<&str> = settings.iter().map(|(k, _)| k.as_str()).collect();
                format!("git config --global {}", keys.join(", "))
            }
        }
    }
}

/// Item kinds, as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Package,
    Font,
    ConfigFile,
    SourceLine,
    GitConfig,
}

impl ItemKind {
    /// Configuration spelling of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Package => "package",
            ItemKind::Font => "font",
            ItemKind::ConfigFile => "config_file",
            ItemKind::SourceLine => "source_line",
            ItemKind::GitConfig => "git_config",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Package names per manager family. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageNames {
    pub apt: Option<String>,
    pub dnf: Option<String>,
}

impl PackageNames {
    /// Same name under both managers.
    pub fn both(name: &str) -> Self {
        Self {
            apt: Some(name.to_string()),
            dnf: Some(name.to_string()),
        }
    }

    /// The package name for a manager, if it has one.
    pub fn for_manager(&self, manager: PackageManager) -> Option<&str> {
        match manager {
            PackageManager::Apt => self.apt.as_deref(),
            PackageManager::Dnf => self.dnf.as_deref(),
        }
    }

    /// Whether no manager has an entry.
    pub fn is_empty(&self) -> bool {
        self.apt.is_none() && self.dnf.is_none()
    }

    /// Human-readable list, e.g. `apt: fd-find, dnf: fd-find`.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(apt) = &self.apt {
            parts.push(format!("apt: {}", apt));
        }
        if let Some(dnf) = &self.dnf {
            parts.push(format!("dnf: {}", dnf));
        }
        parts.join(", ")
    }
}

/// Manual install used when no package-manager entry applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// Download a release archive and copy one binary out of it.
    Release {
        url: String,
        binary: String,
        dest: PathBuf,
    },
    /// Download an install script and run it with `sh`.
    Script { url: String, args: Vec<String> },
}

impl Fallback {
    /// Short description for output.
    pub fn describe(&self) -> String {
        match self {
            Fallback::Release { url, .. } => format!("release download from {}", url),
            Fallback::Script { url, .. } => format!("install script from {}", url),
        }
    }
}

/// Ordered set of desired items.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<DesiredItem>,
}

impl Catalog {
    /// Create a catalog from items in reconcile order.
    pub fn new(items: Vec<DesiredItem>) -> Self {
        Self { items }
    }

    /// Items in reconcile order.
    pub fn items(&self) -> &[DesiredItem] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by name.
    pub fn get(&self, name: &str) -> Option<&DesiredItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Restrict to `only` (when non-empty) and drop anything in `skip`.
    ///
    /// Returns the names in `only` and `skip` that match no item, so the
    /// caller can warn about typos.
    pub fn select(&self, only: &[String], skip: &[String]) -> (Catalog, Vec<String>) {
        let unknown = only
            .iter()
            .chain(skip)
            .filter(|name| self.get(name).is_none())
            .cloned()
            .collect();

        let items = self
            .items
            .iter()
            .filter(|item| only.is_empty() || only.contains(&item.name))
            .filter(|item| !skip.contains(&item.name))
            .cloned()
            .collect();

        (Catalog::new(items), unknown)
    }
}
