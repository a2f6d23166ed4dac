//! Configuration discovery, loading and layering.
//!
//! Layers, later overriding earlier:
//! 1. Built-in catalog embedded in the binary
//! 2. User config (`~/.config/rigup/config.yml` under the provisioned home)
//! 3. Explicit `--config` file

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::{builtin, Catalog, DesiredItem};
use crate::config::resolve::{resolve_item, ContentSource};
use crate::config::schema::{RigupConfig, SettingsConfig, SudoSetting};
use crate::config::validator::validate;
use crate::detection::ManagerSetting;
use crate::error::{RigupError, Result};
use crate::fetch::DEFAULT_TIMEOUT;

/// Paths to configuration files in layering order.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// User config, if present: `~/.config/rigup/config.yml`
    pub user: Option<PathBuf>,

    /// Explicit `--config` file. Must exist when given.
    pub explicit: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given home.
    pub fn discover(home: &Path, explicit: Option<&Path>) -> Self {
        let user = Self::user_config_path(home);
        Self {
            user: user.exists().then_some(user),
            explicit: explicit.map(Path::to_path_buf),
        }
    }

    /// Location of the user config under `home`.
    pub fn user_config_path(home: &Path) -> PathBuf {
        home.join(".config").join("rigup").join("config.yml")
    }

    /// Returns all config paths in layering order.
    pub fn all(&self) -> Vec<&PathBuf> {
        self.user.iter().chain(self.explicit.iter()).collect()
    }
}

/// Effective run settings after layering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub manager: ManagerSetting,
    pub sudo: SudoSetting,
    pub fail_fast: bool,
    pub download_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            manager: ManagerSetting::Auto,
            sudo: SudoSetting::Auto,
            fail_fast: false,
            download_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Settings {
    fn apply(&mut self, layer: &SettingsConfig) {
        if let Some(manager) = layer.manager {
            self.manager = manager;
        }
        if let Some(sudo) = layer.sudo {
            self.sudo = sudo;
        }
        if let Some(fail_fast) = layer.fail_fast {
            self.fail_fast = fail_fast;
        }
        if let Some(secs) = layer.download_timeout_secs {
            self.download_timeout = Duration::from_secs(secs);
        }
    }
}

/// Fully layered configuration.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub settings: Settings,
    pub catalog: Catalog,
    /// Human-readable list of the layers that contributed, in order.
    pub sources: Vec<String>,
}

/// Load a config file from disk.
///
/// # Errors
///
/// `ConfigNotFound` if the file does not exist, `ConfigParseError` if it
/// is not valid YAML for the schema.
pub fn load_config_file(path: &Path) -> Result<RigupConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RigupError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RigupError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`RigupConfig`].
pub fn parse_config(content: &str, source_path: &Path) -> Result<RigupConfig> {
    serde_yaml::from_str(content).map_err(|e| RigupError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the built-in catalog and every config layer for `home`.
///
/// # Errors
///
/// Any missing explicit file, parse error, validation error or unreadable
/// `source:` fragment aborts loading.
pub fn load(home: &Path, explicit: Option<&Path>) -> Result<LoadedConfig> {
    let paths = ConfigPaths::discover(home, explicit);
    let mut layers = Layers::default();

    let builtin_config = parse_config(builtin::catalog_yaml()?, Path::new(builtin::CATALOG_FILE))?;
    layers.apply(builtin_config, home, ContentSource::Embedded, true)?;
    let mut sources = vec!["built-in catalog".to_string()];

    for path in paths.all() {
        tracing::debug!("Loading config layer {}", path.display());
        let config = load_config_file(path)?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        layers.apply(config, home, ContentSource::Dir(dir), false)?;
        sources.push(path.display().to_string());
    }

    Ok(LoadedConfig {
        settings: layers.settings,
        catalog: Catalog::new(layers.items.into_iter().map(|(item, _)| item).collect()),
        sources,
    })
}

/// Items accumulated so far, each tagged with whether it came from the built-in layer.
#[derive(Default)]
struct Layers {
    settings: Settings,
    items: Vec<(DesiredItem, bool)>,
}

impl Layers {
    fn apply(
        &mut self,
        config: RigupConfig,
        home: &Path,
        source: ContentSource<'_>,
        builtin: bool,
    ) -> Result<()> {
        validate(&config)?;
        self.settings.apply(&config.settings);

        if config.builtin == Some(false) {
            self.items.retain(|(_, from_builtin)| !from_builtin);
        }

        for name in &config.disable {
            let before = self.items.len();
            self.items.retain(|(item, _)| &item.name != name);
            if self.items.len() == before {
                tracing::warn!("Cannot disable '{}': no such item", name);
            }
        }

        for item_config in &config.items {
            let item = resolve_item(item_config, home, source)?;
            match self.items.iter_mut().find(|(existing, _)| existing.name == item.name) {
                Some(slot) => *slot = (item, builtin),
                None => self.items.push((item, builtin)),
            }
        }

        Ok(())
    }
}
