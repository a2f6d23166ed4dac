//! Terminal user interface.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for real terminals (colors and spinners when a TTY)
//! - [`MockUI`] capturing output for tests
//! - Spinners, tables, and the end-of-run summary box
//!
//! # Example
//!
//! ```
//! use rigup::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(OutputMode::Quiet, false);
//! ui.show_header("rigup");
//! ui.success("tmux installed");
//! ```

pub mod mock;
pub mod output;
pub mod progress;
pub mod spinner;
pub mod table;
pub mod terminal;
pub mod theme;

use std::time::Duration;

pub use mock::MockUI;
pub use output::OutputMode;
pub use progress::{format_counter, format_duration};
pub use spinner::ProgressSpinner;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, RigupTheme};

use crate::reconcile::{OutcomeCounts, RunReport};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a plain message.
    fn message(&mut self, msg: &str);

    /// Display a changed item.
    fn success(&mut self, msg: &str);

    /// Display an already-satisfied item.
    fn satisfied(&mut self, msg: &str);

    /// Display a pending item (status mode).
    fn pending(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show the end-of-run summary box.
    fn show_summary(&mut self, summary: &RunSummary);
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Stop and clear the spinner line.
    fn finish(&mut self);
}

/// Condensed view of a [`RunReport`] for the summary box.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub title: String,
    pub counts: OutcomeCounts,
    /// `(item, error)` for every failed item.
    pub failed: Vec<(String, String)>,
    /// `(item, reason)` for every unavailable item.
    pub unavailable: Vec<(String, String)>,
    pub not_attempted: Vec<String>,
    pub total_duration: Duration,
}

impl RunSummary {
    /// Build a summary from a finished run.
    pub fn from_report(title: &str, report: &RunReport) -> Self {
        let pairs = |items: Vec<&crate::reconcile::ItemReport>| {
            items
                .into_iter()
                .map(|item| {
                    (
                        item.name.clone(),
                        item.outcome.detail().unwrap_or_default().to_string(),
                    )
                })
                .collect()
        };

        Self {
            title: title.to_string(),
            counts: report.counts(),
            failed: pairs(report.failed()),
            unavailable: pairs(report.unavailable()),
            not_attempted: report.not_attempted.clone(),
            total_duration: report.duration,
        }
    }

    /// One-line counts, e.g. `2 changed · 12 satisfied · 1 failed`.
    pub fn count_line(&self) -> String {
        let c = &self.counts;
        let parts: Vec<String> = [
            (c.changed, "changed"),
            (c.satisfied, "satisfied"),
            (c.pending, "pending"),
            (c.unavailable, "unavailable"),
            (c.failed, "failed"),
        ]
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, label)| format!("{} {}", count, label))
        .collect();

        if parts.is_empty() {
            "no items".to_string()
        } else {
            parts.join(" · ")
        }
    }
}
