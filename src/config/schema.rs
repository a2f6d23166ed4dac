//! Configuration schema types.
//!
//! These mirror the YAML file format one to one. They are turned into
//! domain types ([`crate::catalog::DesiredItem`]) by the resolver once
//! `~` and `source:` references can be expanded.

use serde::Deserialize;

use crate::detection::ManagerSetting;

/// One configuration file: the built-in catalog, the user file, or `--config`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RigupConfig {
    /// Run settings. Unset keys inherit from earlier layers.
    pub settings: SettingsConfig,

    /// `false` drops every built-in item.
    pub builtin: Option<bool>,

    /// Item names to drop.
    pub disable: Vec<String>,

    /// Items to append, or to replace in place when the name already exists.
    pub items: Vec<ItemConfig>,
}

/// Run settings as written in a file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    pub manager: Option<ManagerSetting>,
    pub sudo: Option<SudoSetting>,
    pub fail_fast: Option<bool>,
    pub download_timeout_secs: Option<u64>,
}

/// When to prefix manager installs with `sudo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SudoSetting {
    /// Use sudo unless already running as root.
    #[default]
    Auto,
    Always,
    Never,
}

impl SudoSetting {
    /// Whether install commands need a `sudo` prefix.
    pub fn use_sudo(&self, elevated: bool) -> bool {
        match self {
            SudoSetting::Auto => !elevated,
            SudoSetting::Always => true,
            SudoSetting::Never => false,
        }
    }
}

/// A desired item as written in a file, tagged by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemConfig {
    Package {
        name: String,
        /// Package name shared by both managers.
        #[serde(default)]
        package: Option<String>,
        /// apt-specific name, overriding `package`.
        #[serde(default)]
        apt: Option<String>,
        /// dnf-specific name, overriding `package`.
        #[serde(default)]
        dnf: Option<String>,
        #[serde(default)]
        probe: Option<ProbeConfig>,
        #[serde(default)]
        fallback: Option<FallbackConfig>,
    },
    Font {
        name: String,
        url: String,
        #[serde(default = "default_font_dir")]
        dir: String,
        #[serde(default)]
        files: Vec<String>,
    },
    ConfigFile {
        name: String,
        path: String,
        #[serde(default)]
        content: Option<String>,
        /// Fragment path relative to the declaring file.
        #[serde(default)]
        source: Option<String>,
    },
    SourceLine {
        name: String,
        file: String,
        line: String,
    },
    GitConfig {
        name: String,
        /// Key order is preserved; values may be any YAML scalar.
        #[serde(default)]
        settings: serde_yaml::Mapping,
    },
}

impl ItemConfig {
    /// The item's name.
    pub fn name(&self) -> &str {
        match self {
            ItemConfig::Package { name, .. }
            | ItemConfig::Font { name, .. }
            | ItemConfig::ConfigFile { name, .. }
            | ItemConfig::SourceLine { name, .. }
            | ItemConfig::GitConfig { name, .. } => name,
        }
    }
}

/// Probe override for package items, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProbeConfig {
    OnPath { command: String },
    /// Query the detected manager's package database (the default).
    Package,
    PathExists { path: String },
}

/// Manual install for package items, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FallbackConfig {
    Release {
        url: String,
        binary: String,
        #[serde(default = "default_bin_dir")]
        dest: String,
    },
    Script {
        url: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

fn default_font_dir() -> String {
    "~/.local/share/fonts".to_string()
}

fn default_bin_dir() -> String {
    "~/.local/bin".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_empty_document() {
        let config: RigupConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.items.is_empty());
        assert!(config.builtin.is_none());
        assert!(config.settings.manager.is_none());
    }

    #[test]
    fn parses_settings() {
        let yaml = r#"
settings:
  manager: none
  sudo: never
  fail_fast: true
  download_timeout_secs: 30
"#;
        let config: RigupConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.settings.manager, Some(ManagerSetting::None));
        assert_eq!(config.settings.sudo, Some(SudoSetting::Never));
        assert_eq!(config.settings.fail_fast, Some(true));
        assert_eq!(config.settings.download_timeout_secs, Some(30));
    }

    #[test]
    fn parses_every_item_kind() {
        let yaml = r#"
items:
  - kind: package
    name: fd
    apt: fd-find
    dnf: fd-find
    probe: { type: package }
  - kind: package
    name: zellij
    probe: { type: on_path, command: zellij }
    fallback: { type: release, url: "https://x/z.tar.gz", binary: zellij }
  - kind: font
    name: mono
    url: https://x/font.tar.xz
    files: [Mono-Regular.ttf]
  - kind: config_file
    name: tmux
    path: ~/.tmux.conf
    content: "set -g mouse on\n"
  - kind: source_line
    name: rc
    file: ~/.bashrc
    line: ". ~/.rc"
  - kind: git_config
    name: git
    settings:
      pull.rebase: true
      init.defaultBranch: main
"#;
        let config: RigupConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.items.len(), 6);

        match &config.items[1] {
            ItemConfig::Package { fallback, .. } => match fallback {
                Some(FallbackConfig::Release { dest, .. }) => assert_eq!(dest, "~/.local/bin"),
                other => panic!("unexpected fallback {:?}", other),
            },
            other => panic!("unexpected item {:?}", other),
        }

        match &config.items[2] {
            ItemConfig::Font { dir, .. } => assert_eq!(dir, "~/.local/share/fonts"),
            other => panic!("unexpected item {:?}", other),
        }

        match &config.items[5] {
            ItemConfig::GitConfig { settings, .. } => {
                let keys: Vec<_> = settings.keys().filter_map(|k| k.as_str()).collect();
                assert_eq!(keys, vec!["pull.rebase", "init.defaultBranch"]);
            }
            other => panic!("unexpected item {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        let yaml = "items:\n  - kind: service\n    name: x\n";
        assert!(serde_yaml::from_str::<RigupConfig>(yaml).is_err());
    }

    #[test]
    fn sudo_setting_respects_elevation() {
        assert!(SudoSetting::Auto.use_sudo(false));
        assert!(!SudoSetting::Auto.use_sudo(true));
        assert!(SudoSetting::Always.use_sudo(true));
        assert!(!SudoSetting::Never.use_sudo(false));
    }

    #[test]
    fn item_name_accessor() {
        let yaml = "items:\n  - kind: source_line\n    name: rc\n    file: a\n    line: b\n";
        let config: RigupConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.items[0].name(), "rc");
    }
}
