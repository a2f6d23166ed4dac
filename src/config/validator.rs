//! Configuration validation rules.
//!
//! Each file is validated on its own before it is layered:
//! - Item names must be non-empty and unique within the file
//! - Package items need a package name or a fallback
//! - Package items with a fallback need a probe the fallback can satisfy
//! - Font items must list at least one file
//! - Config-file items take exactly one of `content` or `source`
//! - Git-config items need at least one setting

use std::collections::HashSet;

use crate::config::schema::{ItemConfig, ProbeConfig, RigupConfig};
use crate::error::{RigupError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: &'static str,
    /// Human-readable error message
    pub message: String,
    /// Item name if the error is item-specific
    pub item: Option<String>,
}

impl ValidationError {
    fn item(rule: &'static str, name: &str, message: String) -> Self {
        Self {
            rule,
            message,
            item: Some(name.to_string()),
        }
    }
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &RigupConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for item in &config.items {
        let name = item.name();
        if name.trim().is_empty() {
            errors.push(ValidationError {
                rule: "empty-name",
                message: format!("An item of kind '{}' has an empty name", kind_of(item)),
                item: None,
            });
            continue;
        }
        if !seen.insert(name) {
            errors.push(ValidationError::item(
                "duplicate-name",
                name,
                format!("Item '{}' is declared more than once", name),
            ));
        }
        errors.extend(validate_item(item));
    }

    for name in &config.disable {
        if name.trim().is_empty() {
            errors.push(ValidationError {
                rule: "empty-name",
                message: "'disable' contains an empty name".to_string(),
                item: None,
            });
        }
    }

    errors
}

fn validate_item(item: &ItemConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let name = item.name();

    match item {
        ItemConfig::Package {
            package,
            apt,
            dnf,
            probe,
            fallback,
            ..
        } => {
            let has_names = package.is_some() || apt.is_some() || dnf.is_some();
            if !has_names && fallback.is_none() {
                errors.push(ValidationError::item(
                    "missing-package",
                    name,
                    format!("Package '{}' needs 'package', 'apt', 'dnf' or a 'fallback'", name),
                ));
            }
            if fallback.is_some() && matches!(probe, None | Some(ProbeConfig::Package)) {
                errors.push(ValidationError::item(
                    "fallback-probe",
                    name,
                    format!(
                        "Package '{}' has a fallback and needs an 'on_path' or 'path_exists' probe",
                        name
                    ),
                ));
            }
        }
        ItemConfig::Font { files, .. } => {
            if files.is_empty() {
                errors.push(ValidationError::item(
                    "missing-font-files",
                    name,
                    format!("Font '{}' must list at least one file", name),
                ));
            }
        }
        ItemConfig::ConfigFile {
            content, source, ..
        } => {
            if content.is_some() == source.is_some() {
                errors.push(ValidationError::item(
                    "config-file-content",
                    name,
                    format!(
                        "Config file '{}' needs exactly one of 'content' or 'source'",
                        name
                    ),
                ));
            }
        }
        ItemConfig::SourceLine { line, .. } => {
            if line.trim().is_empty() || line.contains('\n') {
                errors.push(ValidationError::item(
                    "source-line",
                    name,
                    format!("Source line '{}' must be a single non-empty line", name),
                ));
            }
        }
        ItemConfig::GitConfig { settings, .. } => {
            if settings.is_empty() {
                errors.push(ValidationError::item(
                    "empty-git-config",
                    name,
                    format!("Git config '{}' has no settings", name),
                ));
            }
        }
    }

    errors
}

fn kind_of(item: &ItemConfig) -> &'static str {
    match item {
        ItemConfig::Package { .. } => "package",
        ItemConfig::Font { .. } => "font",
        ItemConfig::ConfigFile { .. } => "config_file",
        ItemConfig::SourceLine { .. } => "source_line",
        ItemConfig::GitConfig { .. } => "git_config",
    }
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &RigupConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(RigupError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> RigupConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn rules(yaml: &str) -> Vec<&'static str> {
        validate_config(&parse(yaml)).iter().map(|e| e.rule).collect()
    }

    #[test]
    fn valid_config_passes() {
        let yaml = r#"
items:
  - kind: package
    name: git
    package: git
  - kind: config_file
    name: tmux
    path: ~/.tmux.conf
    content: "x"
"#;
        assert!(validate(&parse(yaml)).is_ok());
    }

    #[test]
    fn rejects_duplicate_names() {
        let yaml = r#"
items:
  - { kind: package, name: git, package: git }
  - { kind: package, name: git, package: git-core }
"#;
        assert_eq!(rules(yaml), vec!["duplicate-name"]);
    }

    #[test]
    fn rejects_empty_name() {
        assert_eq!(
            rules("items:\n  - { kind: package, name: '', package: git }\n"),
            vec!["empty-name"]
        );
    }

    #[test]
    fn rejects_package_without_names_or_fallback() {
        assert_eq!(
            rules("items:\n  - { kind: package, name: tool }\n"),
            vec!["missing-package"]
        );
    }

    #[test]
    fn rejects_fallback_with_package_probe() {
        let yaml = r#"
items:
  - kind: package
    name: zellij
    fallback: { type: script, url: "https://x/install.sh" }
"#;
        assert_eq!(rules(yaml), vec!["fallback-probe"]);
    }

    #[test]
    fn rejects_font_without_files() {
        let yaml = "items:\n  - { kind: font, name: mono, url: 'https://x/f.zip' }\n";
        assert_eq!(rules(yaml), vec!["missing-font-files"]);
    }

    #[test]
    fn config_file_needs_exactly_one_content_source() {
        let neither = "items:\n  - { kind: config_file, name: c, path: ~/c }\n";
        let both = "items:\n  - { kind: config_file, name: c, path: ~/c, content: a, source: b }\n";
        assert_eq!(rules(neither), vec!["config-file-content"]);
        assert_eq!(rules(both), vec!["config-file-content"]);
    }

    #[test]
    fn rejects_empty_git_config() {
        let yaml = "items:\n  - { kind: git_config, name: g, settings: {} }\n";
        assert_eq!(rules(yaml), vec!["empty-git-config"]);
    }

    #[test]
    fn collects_all_errors() {
        let yaml = r#"
items:
  - { kind: package, name: a }
  - { kind: git_config, name: g }
"#;
        let err = validate(&parse(yaml)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'a'"));
        assert!(message.contains("'g'"));
    }
}
