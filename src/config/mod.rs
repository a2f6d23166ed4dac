//! Configuration loading, parsing, and validation for rigup.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and layering in [`loader`]
//! - Validation in [`validator`]
//! - Resolution into catalog items in [`resolve`]
//!
//! # Example
//!
//! ```
//! use rigup::config::load;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let home = TempDir::new().unwrap();
//! let extra = home.path().join("extra.yml");
//! fs::write(&extra, "builtin: false\nitems:\n  - { kind: package, name: git, package: git }\n").unwrap();
//!
//! let config = load(home.path(), Some(&extra)).unwrap();
//! assert_eq!(config.catalog.len(), 1);
//! ```
//!
//! # Configuration File Locations
//!
//! rigup layers configuration in this order:
//! 1. Built-in catalog embedded in the binary
//! 2. User config (`~/.config/rigup/config.yml`)
//! 3. `--config PATH`

pub mod loader;
pub mod resolve;
pub mod schema;
pub mod validator;

pub use loader::{load, load_config_file, parse_config, ConfigPaths, LoadedConfig, Settings};
pub use resolve::{resolve_item, ContentSource};
pub use schema::{FallbackConfig, ItemConfig, ProbeConfig, RigupConfig, SettingsConfig, SudoSetting};
pub use validator::{validate, validate_config, ValidationError};
