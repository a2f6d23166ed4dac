//! Run command implementation.
//!
//! The `rigup run` command reconciles every catalog item in order.

use std::path::{Path, PathBuf};

use crate::cli::args::RunArgs;
use crate::config::{self, LoadedConfig};
use crate::error::Result;
use crate::host::{Host, SystemHost};
use crate::reconcile::{Reconciler, RunOptions, RunProgress};
use crate::ui::{format_counter, OutputMode, RunSummary, SpinnerHandle, UserInterface};

use super::dispatcher::{run_context, warn_missing_manager, Command, CommandResult};
use super::display;

/// The run command implementation.
pub struct RunCommand {
    home: PathBuf,
    config: Option<PathBuf>,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(home: &Path, config: Option<&Path>, args: RunArgs) -> Self {
        Self {
            home: home.to_path_buf(),
            config: config.map(Path::to_path_buf),
            args,
        }
    }

    fn build_options(&self, loaded: &LoadedConfig) -> RunOptions {
        RunOptions {
            fail_fast: self.args.fail_fast || loaded.settings.fail_fast,
            check_only: false,
        }
    }

    /// Reconcile an already-loaded configuration against `host`.
    pub fn execute_with(
        &self,
        loaded: &LoadedConfig,
        host: &dyn Host,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        ui.show_header(&format!("Provisioning {}", self.home.display()));
        if ui.output_mode() == OutputMode::Verbose {
            ui.message(&format!("Config: {}", loaded.sources.join(", ")));
        }

        let (catalog, unknown) = loaded.catalog.select(&self.args.only, &self.args.skip);
        for name in unknown {
            ui.warning(&format!("Unknown item '{}' in --only/--skip", name));
        }

        let ctx = run_context(host, &loaded.settings, &self.home);
        warn_missing_manager(&ctx, &loaded.settings, ui);
        let reconciler = Reconciler::new(&ctx, self.build_options(loaded));

        let mut spinner: Option<Box<dyn SpinnerHandle>> = None;
        let report = reconciler.run_with_progress(&catalog, |progress| match progress {
            RunProgress::ItemStarting {
                name,
                index,
                total,
                may_prompt,
            } => {
                let label = format!("{} {}", format_counter(index, total), name);
                if may_prompt {
                    // No spinner: it would redraw over a sudo password prompt.
                    ui.message(&label);
                } else {
                    spinner = Some(ui.start_spinner(&label));
                }
            }
            RunProgress::ItemFinished { report } => {
                if let Some(mut s) = spinner.take() {
                    s.finish();
                }
                display::show_item(ui, report);
            }
            RunProgress::Finalizing => {
                spinner = Some(ui.start_spinner("Refreshing font cache"));
            }
        });
        if let Some(mut s) = spinner.take() {
            s.finish();
        }

        for warning in &report.warnings {
            ui.warning(warning);
        }
        ui.show_summary(&RunSummary::from_report("Summary", &report));

        if report.has_failures() {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let loaded = config::load(&self.home, self.config.as_deref())?;
        let host = SystemHost::new(&self.home, loaded.settings.download_timeout)?;
        self.execute_with(&loaded, &host, ui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockHost;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
settings:
  manager: none
builtin: false
items:
  - kind: config_file
    name: editor-config
    path: ~/.config/editor/settings.toml
    content: "theme = \"dark\"\n"
  - kind: source_line
    name: profile-source
    file: ~/.profile
    line: ". ~/.config/editor/env"
"#;

    fn setup_home(config: &str) -> (TempDir, LoadedConfig) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("extra.yml");
        fs::write(&path, config).unwrap();
        let loaded = config::load(temp.path(), Some(&path)).unwrap();
        (temp, loaded)
    }

    #[test]
    fn run_applies_items_then_is_idempotent() {
        let (temp, loaded) = setup_home(CONFIG);
        let host = MockHost::new();
        let cmd = RunCommand::new(temp.path(), None, RunArgs::default());

        let mut ui = MockUI::new();
        let result = cmd.execute_with(&loaded, &host, &mut ui).unwrap();
        assert!(result.success);
        assert_eq!(ui.successes().len(), 2);
        assert_eq!(
            fs::read_to_string(temp.path().join(".config/editor/settings.toml")).unwrap(),
            "theme = \"dark\"\n"
        );

        let mut ui = MockUI::new();
        let result = cmd.execute_with(&loaded, &host, &mut ui).unwrap();
        assert!(result.success);
        assert!(ui.successes().is_empty());
        assert_eq!(ui.satisfied_lines().len(), 2);
        let profile = fs::read_to_string(temp.path().join(".profile")).unwrap();
        assert_eq!(profile.matches("~/.config/editor/env").count(), 1);
    }

    #[test]
    fn run_reports_failures_with_exit_code_one() {
        let config = r#"
settings:
  manager: apt
builtin: false
items:
  - kind: package
    name: jq
    package: jq
  - kind: config_file
    name: after
    path: ~/after.txt
    content: "x"
"#;
        let (temp, loaded) = setup_home(config);
        let host = MockHost::new().with_tool("apt-get");
        let cmd = RunCommand::new(temp.path(), None, RunArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute_with(&loaded, &host, &mut ui).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("jq"));
        assert!(temp.path().join("after.txt").exists());
        assert_eq!(ui.summaries()[0].failed[0].0, "jq");
    }

    #[test]
    fn run_fail_fast_stops_after_failure() {
        let config = r#"
settings:
  manager: apt
builtin: false
items:
  - kind: package
    name: jq
    package: jq
  - kind: config_file
    name: after
    path: ~/after.txt
    content: "x"
"#;
        let (temp, loaded) = setup_home(config);
        let host = MockHost::new().with_tool("apt-get");
        let args = RunArgs {
            fail_fast: true,
            ..Default::default()
        };
        let cmd = RunCommand::new(temp.path(), None, args);
        let mut ui = MockUI::new();

        let result = cmd.execute_with(&loaded, &host, &mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(!temp.path().join("after.txt").exists());
        assert_eq!(ui.summaries()[0].not_attempted, vec!["after".to_string()]);
    }

    #[test]
    fn sudo_installs_run_without_spinner() {
        let config = r#"
settings:
  manager: apt
  sudo: always
builtin: false
items:
  - kind: package
    name: jq
    package: jq
  - kind: config_file
    name: after
    path: ~/after.txt
    content: "x"
"#;
        let (temp, loaded) = setup_home(config);
        let host = MockHost::new()
            .with_tool("apt-get")
            .with_package("jq", Some("jq"));
        let cmd = RunCommand::new(temp.path(), None, RunArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute_with(&loaded, &host, &mut ui).unwrap();

        assert!(result.success);
        assert!(host.ran("sudo env DEBIAN_FRONTEND=noninteractive apt-get install -y jq"));
        assert_eq!(ui.spinners().len(), 1);
        assert!(ui.spinners()[0].ends_with("after"));
        assert!(ui.messages().iter().any(|m| m.ends_with(" jq")));
    }

    #[test]
    fn run_only_and_unknown_names() {
        let (temp, loaded) = setup_home(CONFIG);
        let host = MockHost::new();
        let args = RunArgs {
            only: vec!["editor-config".into(), "nope".into()],
            ..Default::default()
        };
        let cmd = RunCommand::new(temp.path(), None, args);
        let mut ui = MockUI::new();

        let result = cmd.execute_with(&loaded, &host, &mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_warning("Unknown item 'nope'"));
        assert!(!temp.path().join(".profile").exists());
        assert_eq!(ui.spinners().len(), 1);
    }

    #[test]
    fn run_unavailable_without_manager_is_not_failure() {
        let config = r#"
builtin: false
items:
  - kind: package
    name: jq
    package: jq
"#;
        let (temp, loaded) = setup_home(config);
        let host = MockHost::new();
        let cmd = RunCommand::new(temp.path(), None, RunArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute_with(&loaded, &host, &mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_warning("No supported package manager"));
        assert!(ui.has_warning("jq"));
        assert_eq!(ui.summaries()[0].unavailable.len(), 1);
        assert!(host.mutating_commands().is_empty());
    }

    #[test]
    fn execute_with_missing_config_errors() {
        let temp = TempDir::new().unwrap();
        let cmd = RunCommand::new(
            temp.path(),
            Some(&temp.path().join("missing.yml")),
            RunArgs::default(),
        );
        let mut ui = MockUI::new();

        let err = cmd.execute(&mut ui).unwrap_err();
        assert!(matches!(err, crate::error::RigupError::ConfigNotFound { .. }));
    }
}
