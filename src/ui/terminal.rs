//! Terminal UI.

use console::Term;
use std::io::Write;

use super::progress::format_duration;
use super::{
    should_use_colors, OutputMode, ProgressSpinner, RigupTheme, RunSummary, SpinnerHandle,
    UserInterface,
};

/// Terminal UI implementation.
///
/// Spinners are only drawn on an interactive terminal outside CI.
pub struct TerminalUI {
    term: Term,
    theme: RigupTheme,
    mode: OutputMode,
    spinners: bool,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode, no_color: bool) -> Self {
        let term = Term::stdout();
        let spinners = term.is_term() && !crate::shell::is_ci();

        Self {
            term,
            theme: RigupTheme::for_colors(should_use_colors(no_color)),
            mode,
            spinners,
        }
    }

    fn line(&mut self, text: &str) {
        writeln!(self.term, "{}", text).ok();
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.line(msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            let text = self.theme.format_success(msg);
            self.line(&text);
        }
    }

    fn satisfied(&mut self, msg: &str) {
        if self.mode.shows_status() {
            let text = self.theme.format_satisfied(msg);
            self.line(&text);
        }
    }

    fn pending(&mut self, msg: &str) {
        if self.mode.shows_status() {
            let text = self.theme.format_pending(msg);
            self.line(&text);
        }
    }

    fn warning(&mut self, msg: &str) {
        let text = self.theme.format_warning(msg);
        self.line(&text);
    }

    fn error(&mut self, msg: &str) {
        let text = self.theme.format_error(msg);
        self.line(&text);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.spinners && self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            let text = self.theme.format_header(title);
            writeln!(self.term, "\n{}\n", text).ok();
        }
    }

    fn show_summary(&mut self, summary: &RunSummary) {
        let b = &self.theme.border;
        let mut lines = Vec::new();

        lines.push(format!(
            "  {} {}",
            b.apply_to("┌─"),
            b.apply_to(format!("{} ──────────────────────────", summary.title))
        ));
        lines.push(format!("  {} {}", b.apply_to("│"), summary.count_line()));

        for (name, error) in &summary.failed {
            lines.push(format!(
                "  {} {} {}",
                b.apply_to("│"),
                self.theme.format_error(&format!("{:<20}", name)),
                self.theme.dim.apply_to(error)
            ));
        }
        for (name, reason) in &summary.unavailable {
            lines.push(format!(
                "  {} {} {}",
                b.apply_to("│"),
                self.theme.format_warning(&format!("{:<20}", name)),
                self.theme.dim.apply_to(reason)
            ));
        }
        if !summary.not_attempted.is_empty() {
            lines.push(format!(
                "  {} {}",
                b.apply_to("│"),
                self.theme.dim.apply_to(format!(
                    "not attempted: {}",
                    summary.not_attempted.join(", ")
                ))
            ));
        }

        lines.push(format!(
            "  {}",
            b.apply_to("├────────────────────────────────────")
        ));
        lines.push(format!(
            "  {} Total: {}",
            b.apply_to("│"),
            self.theme
                .duration
                .apply_to(format_duration(summary.total_duration))
        ));
        lines.push(format!(
            "  {}",
            b.apply_to("└────────────────────────────────────")
        ));

        writeln!(self.term).ok();
        for line in lines {
            self.line(&line);
        }
    }
}

/// Create the terminal UI for the given verbosity.
pub fn create_ui(mode: OutputMode, no_color: bool) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode, no_color))
}
