//! rigup - Idempotent workstation provisioning.
//!
//! rigup walks a catalog of desired items (packages, fonts, config files,
//! shell source lines and git settings), probes whether each one is
//! already present, and installs or writes only what is missing. Running
//! it twice in a row changes nothing the second time.
//!
//! # Modules
//!
//! - [`catalog`] - Desired items and the embedded built-in catalog
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Layered configuration loading and validation
//! - [`detection`] - Package-manager detection and presence probes
//! - [`host`] - The system seam (PATH, commands, downloads)
//! - [`reconcile`] - The reconciliation loop and per-kind handlers
//! - [`ui`] - Spinners, status lines and the summary box
//!
//! # Example
//!
//! ```
//! use rigup::catalog::{Action, Catalog, DesiredItem};
//! use rigup::detection::content_digest;
//! use rigup::detection::Probe;
//! use rigup::host::MockHost;
//! use rigup::reconcile::{Reconciler, RunContext, RunOptions};
//!
//! let home = tempfile::tempdir().unwrap();
//! let path = home.path().join(".tmux.conf");
//! let content = "set -g mouse on\n".to_string();
//! let catalog = Catalog::new(vec![DesiredItem {
//!     name: "tmux-config".into(),
//!     probe: Probe::ContentHash {
//!         path: path.clone(),
//!         digest: content_digest(content.as_bytes()),
//!     },
//!     action: Action::ConfigFile { path: path.clone(), content },
//! }]);
//!
//! let host = MockHost::new();
//! let ctx = RunContext::new(&host, None, home.path(), false);
//! let report = Reconciler::new(&ctx, RunOptions::default()).run(&catalog);
//! assert!(!report.has_failures());
//!
//! let again = Reconciler::new(&ctx, RunOptions::default()).run(&catalog);
//! assert!(again.all_satisfied());
//! ```

pub mod archive;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod fetch;
pub mod host;
pub mod reconcile;
pub mod shell;
pub mod sys;
pub mod ui;

pub use error::{Result, RigupError};
