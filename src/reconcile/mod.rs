//! Idempotent reconciliation of the catalog against the live system.
//!
//! For every item: probe; present means nothing to do; absent means run the
//! item's install action and record the outcome. One failing item never
//! stops the rest unless fail-fast is requested.

pub mod config_file;
pub mod context;
pub mod font;
pub mod git_config;
pub mod outcome;
pub mod package;
pub mod runner;
pub mod source_line;

pub use context::{RunContext, RunOptions, RunState};
pub use outcome::{ItemReport, Outcome, OutcomeCounts, RunReport};
pub use runner::{Reconciler, RunProgress};
