//! The reconciliation loop.

use std::time::Instant;

use crate::catalog::{Action, Catalog, DesiredItem};
use crate::error::Result;

use super::context::{RunContext, RunOptions, RunState};
use super::outcome::{ItemReport, Outcome, RunReport};
use super::{config_file, font, git_config, package, source_line};

/// Progress events emitted during a run.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// An item is about to be probed.
    ItemStarting {
        name: &'a str,
        index: usize,
        total: usize,
        /// The item will run a `sudo` manager install, which may prompt
        /// for a password on the terminal.
        may_prompt: bool,
    },
    /// An item finished.
    ItemFinished { report: &'a ItemReport },
    /// The font cache is being refreshed.
    Finalizing,
}

/// Walks a catalog in order and brings each item to its desired state.
pub struct Reconciler<'a> {
    ctx: &'a RunContext<'a>,
    options: RunOptions,
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler for one run.
    pub fn new(ctx: &'a RunContext<'a>, options: RunOptions) -> Self {
        Self { ctx, options }
    }

    /// Reconcile every item.
    pub fn run(&self, catalog: &Catalog) -> RunReport {
        self.run_with_progress(catalog, |_| {})
    }

    /// Reconcile every item, reporting progress.
    ///
    /// Item errors become [`Outcome::Failed`] and the loop moves on, unless
    /// `fail_fast` is set, in which case the remaining items are listed as
    /// not attempted.
    pub fn run_with_progress(
        &self,
        catalog: &Catalog,
        mut on_progress: impl FnMut(RunProgress<'_>),
    ) -> RunReport {
        let start = Instant::now();
        let mut state = RunState::default();
        let mut report = RunReport::default();
        let total = catalog.len();

        for (index, item) in catalog.items().iter().enumerate() {
            on_progress(RunProgress::ItemStarting {
                name: &item.name,
                index: index + 1,
                total,
                may_prompt: self.may_prompt(item),
            });

            let item_start = Instant::now();
            let outcome = match self.reconcile_item(item, &mut state) {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!("{} failed: {}", item.name, e);
                    Outcome::Failed {
                        error: e.to_string(),
                    }
                }
            };
            let failed = outcome.is_failure();

            report.items.push(ItemReport {
                name: item.name.clone(),
                kind: item.kind(),
                outcome,
                duration: item_start.elapsed(),
            });
            if let Some(last) = report.items.last() {
                on_progress(RunProgress::ItemFinished { report: last });
            }

            if failed && self.options.fail_fast {
                report.not_attempted = catalog.items()[index + 1..]
                    .iter()
                    .map(|item| item.name.clone())
                    .collect();
                break;
            }
        }

        if !state.fonts_installed.is_empty() {
            on_progress(RunProgress::Finalizing);
            self.refresh_font_cache(&mut state);
        }

        report.fonts_installed = state.fonts_installed;
        report.warnings.extend(state.warnings);
        report.duration = start.elapsed();
        report
    }

    fn may_prompt(&self, item: &DesiredItem) -> bool {
        if self.options.check_only || !self.ctx.sudo {
            return false;
        }
        match &item.action {
            Action::Package { names, fallback } => matches!(
                package::plan(self.ctx, &item.name, names, fallback.as_ref()),
                package::InstallPlan::Manager { .. }
            ),
            _ => false,
        }
    }

    fn reconcile_item(&self, item: &DesiredItem, state: &mut RunState) -> Result<Outcome> {
        let ctx = self.ctx;

        if item.probe.is_present(ctx.host, ctx.manager) {
            return Ok(Outcome::Satisfied);
        }

        if self.options.check_only {
            return Ok(match &item.action {
                Action::Package { names, fallback } => {
                    package::preview(ctx, &item.name, names, fallback.as_ref())
                }
                Action::Font { url, dir, .. } => font::preview(url, dir),
                Action::ConfigFile { path, .. } => config_file::preview(path),
                Action::SourceLine { file, .. } => source_line::preview(file),
                Action::GitConfig { settings } => git_config::preview(ctx.host, settings),
            });
        }

        match &item.action {
            Action::Package { names, fallback } => {
                package::install(ctx, state, &item.name, &item.probe, names, fallback.as_ref())
            }
            Action::Font { url, dir, files } => {
                font::install(ctx, state, &item.name, url, dir, files)
            }
            Action::ConfigFile { path, content } => config_file::apply(path, content),
            Action::SourceLine { file, line } => source_line::apply(file, line),
            Action::GitConfig { settings } => git_config::apply(ctx.host, settings),
        }
    }

    fn refresh_font_cache(&self, state: &mut RunState) {
        let host = self.ctx.host;

        if host.which("fc-cache").is_none() {
            let warning = format!(
                "Installed fonts ({}) but fc-cache was not found; install fontconfig and run 'fc-cache -f'",
                state.fonts_installed.join(", ")
            );
            tracing::warn!("{}", warning);
            state.warnings.push(warning);
            return;
        }

        match host.run("fc-cache -f") {
            Ok(result) if result.success => tracing::debug!("Font cache refreshed"),
            Ok(result) => state.warnings.push(format!(
                "'fc-cache -f' exited with {:?}; new fonts may not appear until it is rerun",
                result.exit_code
            )),
            Err(e) => state.warnings.push(format!("Could not run fc-cache: {}", e)),
        }
    }
}
