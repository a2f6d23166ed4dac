//! Capability detection: which package manager exists and which items are present.

pub mod package_manager;
pub mod probe;

pub use package_manager::{ManagerSetting, PackageManager};
pub use probe::{contains_bytes, content_digest, Probe};
