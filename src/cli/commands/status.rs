//! Status command implementation.
//!
//! The `rigup status` command probes every item and reports what a run
//! would change, without changing anything.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::StatusArgs;
use crate::config::{self, LoadedConfig};
use crate::error::Result;
use crate::host::{Host, SystemHost};
use crate::reconcile::{
    ItemReport, OutcomeCounts, Reconciler, RunContext, RunOptions, RunReport,
};
use crate::ui::{RunSummary, UserInterface};

use super::dispatcher::{run_context, warn_missing_manager, Command, CommandResult};
use super::display;

/// The status command implementation.
pub struct StatusCommand {
    home: PathBuf,
    config: Option<PathBuf>,
    args: StatusArgs,
}

/// JSON document printed by `status --json`.
#[derive(Debug, Serialize)]
struct StatusJson<'a> {
    home: &'a Path,
    manager: Option<&'static str>,
    all_satisfied: bool,
    counts: OutcomeCounts,
    items: &'a [ItemReport],
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(home: &Path, config: Option<&Path>, args: StatusArgs) -> Self {
        Self {
            home: home.to_path_buf(),
            config: config.map(Path::to_path_buf),
            args,
        }
    }

    /// Probe an already-loaded configuration against `host`.
    pub fn execute_with(
        &self,
        loaded: &LoadedConfig,
        host: &dyn Host,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let options = RunOptions {
            fail_fast: false,
            check_only: true,
        };

        let ctx = run_context(host, &loaded.settings, &self.home);

        let report = if self.args.json {
            let report = Reconciler::new(&ctx, options).run(&loaded.catalog);
            let doc = StatusJson {
                home: &self.home,
                manager: ctx.manager.map(|m| m.name()),
                all_satisfied: report.all_satisfied(),
                counts: report.counts(),
                items: &report.items,
            };
            let json = serde_json::to_string_pretty(&doc)
                .map_err(|e| anyhow::anyhow!("Failed to serialize status: {}", e))?;
            println!("{}", json);
            report
        } else {
            self.show(loaded, &ctx, options, ui)
        };

        if report.all_satisfied() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }

    fn show(
        &self,
        loaded: &LoadedConfig,
        ctx: &RunContext<'_>,
        options: RunOptions,
        ui: &mut dyn UserInterface,
    ) -> RunReport {
        ui.show_header(&format!("Status of {}", self.home.display()));
        warn_missing_manager(ctx, &loaded.settings, ui);

        let report = Reconciler::new(ctx, options).run(&loaded.catalog);
        for item in &report.items {
            display::show_item(ui, item);
        }
        ui.show_summary(&RunSummary::from_report("Status", &report));
        report
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let loaded = config::load(&self.home, self.config.as_deref())?;
        let host = SystemHost::new(&self.home, loaded.settings.download_timeout)?;
        self.execute_with(&loaded, &host, ui)
    }
}
