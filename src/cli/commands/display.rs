//! Shared display helpers for item outcomes.
//!
//! Used by `run` and `status` so both render an [`ItemReport`] the same way.

use crate::catalog::ItemKind;
use crate::reconcile::{ItemReport, Outcome};
use crate::ui::{format_duration, OutputMode, UserInterface};

/// Phrase used for an item that needed no change.
pub fn satisfied_phrase(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Package | ItemKind::Font => "already installed",
        ItemKind::ConfigFile => "already up to date",
        ItemKind::SourceLine => "already sourced",
        ItemKind::GitConfig => "already configured",
    }
}

/// Print one item's outcome line, styled by severity.
pub fn show_item(ui: &mut dyn UserInterface, report: &ItemReport) {
    let mut line = match &report.outcome {
        Outcome::Satisfied => format!("{} {}", report.name, satisfied_phrase(report.kind)),
        Outcome::Changed { detail } | Outcome::Pending { detail } => {
            format!("{} {}", report.name, detail)
        }
        Outcome::Unavailable { reason } => format!("{}: {}", report.name, reason),
        Outcome::Failed { error } => format!("{} failed: {}", report.name, error),
    };

    if ui.output_mode() == OutputMode::Verbose {
        line.push_str(&format!(" ({})", format_duration(report.duration)));
    }

    match report.outcome {
        Outcome::Satisfied => ui.satisfied(&line),
        Outcome::Changed { .. } => ui.success(&line),
        Outcome::Pending { .. } => ui.pending(&line),
        Outcome::Unavailable { .. } => ui.warning(&line),
        Outcome::Failed { .. } => ui.error(&line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::time::Duration;

    fn report(name: &str, kind: ItemKind, outcome: Outcome) -> ItemReport {
        ItemReport {
            name: name.to_string(),
            kind,
            outcome,
            duration: Duration::from_millis(12),
        }
    }

    #[test]
    fn show_item_uses_matching_ui_method() {
        let mut ui = MockUI::new();
        show_item(&mut ui, &report("git", ItemKind::Package, Outcome::Satisfied));
        show_item(
            &mut ui,
            &report(
                "tmux",
                ItemKind::Package,
                Outcome::Changed { detail: "installed via apt".into() },
            ),
        );
        show_item(
            &mut ui,
            &report(
                "fd",
                ItemKind::Package,
                Outcome::Unavailable { reason: "no package manager".into() },
            ),
        );
        show_item(
            &mut ui,
            &report(
                "jq",
                ItemKind::Package,
                Outcome::Failed { error: "exit code 100".into() },
            ),
        );
        show_item(
            &mut ui,
            &report(
                "bashrc-source",
                ItemKind::SourceLine,
                Outcome::Pending { detail: "would append to ~/.bashrc".into() },
            ),
        );

        assert_eq!(ui.satisfied_lines(), ["git already installed"]);
        assert_eq!(ui.successes(), ["tmux installed via apt"]);
        assert_eq!(ui.warnings(), ["fd: no package manager"]);
        assert_eq!(ui.errors(), ["jq failed: exit code 100"]);
        assert_eq!(ui.pending_lines(), ["bashrc-source would append to ~/.bashrc"]);
    }

    #[test]
    fn verbose_mode_appends_duration() {
        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        show_item(
            &mut ui,
            &report("starship-config", ItemKind::ConfigFile, Outcome::Satisfied),
        );
        assert_eq!(
            ui.satisfied_lines(),
            ["starship-config already up to date (12ms)"]
        );
    }
}
