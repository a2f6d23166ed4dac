//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use anyhow::anyhow;

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::config::Settings;
use crate::detection::{ManagerSetting, PackageManager};
use crate::error::Result;
use crate::host::Host;
use crate::reconcile::RunContext;
use crate::shell::is_elevated;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    home: PathBuf,
    config: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a dispatcher provisioning `home`, with an optional extra config layer.
    pub fn new(home: PathBuf, config: Option<PathBuf>) -> Self {
        Self { home, config }
    }

    /// Build a dispatcher from parsed global flags.
    ///
    /// `--home` (or `RIGUP_HOME`) wins over the current user's home.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let home = match &cli.home {
            Some(home) => home.clone(),
            None => dirs::home_dir()
                .ok_or_else(|| anyhow!("Cannot determine the home directory; pass --home"))?,
        };
        Ok(Self::new(home, cli.config.clone()))
    }

    /// Home directory being provisioned.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.config.as_deref();
        match &cli.command {
            Some(Commands::Run(args)) => {
                super::run::RunCommand::new(&self.home, config, args.clone()).execute(ui)
            }
            Some(Commands::Status(args)) => {
                super::status::StatusCommand::new(&self.home, config, args.clone()).execute(ui)
            }
            Some(Commands::List(_)) => super::list::ListCommand::new(&self.home, config).execute(ui),
            None => super::run::RunCommand::new(&self.home, config, RunArgs::default()).execute(ui),
        }
    }
}

/// Detect the package manager and sudo policy for a run.
pub fn run_context<'a>(host: &'a dyn Host, settings: &Settings, home: &Path) -> RunContext<'a> {
    let manager = PackageManager::select(settings.manager, host);
    let sudo = settings.sudo.use_sudo(is_elevated());
    tracing::debug!("Package manager: {:?}, sudo: {}", manager, sudo);

    RunContext::new(host, manager, home, sudo)
}

/// Warn when automatic detection found neither apt nor dnf.
pub fn warn_missing_manager(ctx: &RunContext<'_>, settings: &Settings, ui: &mut dyn UserInterface) {
    if ctx.manager.is_none() && settings.manager == ManagerSetting::Auto {
        ui.warning(
            "No supported package manager found (apt or dnf); only items with a fallback can be installed",
        );
    }
}
