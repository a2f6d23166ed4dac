//! The system seam.
//!
//! Everything the reconciler needs from the outside world that is not plain
//! file I/O under the provisioned home goes through [`Host`]: PATH lookups,
//! running commands and downloading files. Production code uses
//! [`SystemHost`]; tests use [`MockHost`], which simulates a small system.

pub mod mock;
pub mod system;

pub use mock::MockHost;
pub use system::SystemHost;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::shell::CommandResult;

/// Access to executables, commands and the network.
pub trait Host {
    /// Resolve an executable on the search path.
    fn which(&self, tool: &str) -> Option<PathBuf>;

    /// Run a shell command, capturing its output.
    ///
    /// A non-zero exit is reported through [`CommandResult::success`],
    /// not as an error; errors mean the command could not be spawned.
    fn run(&self, command: &str) -> Result<CommandResult>;

    /// Download `url` into `dest`, returning the number of bytes written.
    fn download(&self, url: &str, dest: &Path) -> Result<u64>;
}
