//! Visual theme and styling.

use console::Style;

/// rigup's visual theme.
#[derive(Debug, Clone)]
pub struct RigupTheme {
    /// Style for changed items (green).
    pub success: Style,
    /// Style for warnings and unavailable items (orange).
    pub warning: Style,
    /// Style for errors and failed items (red bold).
    pub error: Style,
    /// Style for pending items (magenta).
    pub info: Style,
    /// Style for already-satisfied items and secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (magenta bold).
    pub header: Style,
    /// Style for durations (dim).
    pub duration: Style,
    /// Style for box-drawing borders (dim).
    pub border: Style,
}

impl Default for RigupTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl RigupTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().magenta(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().magenta(),
            duration: Style::new().dim(),
            border: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            duration: Style::new(),
            border: Style::new(),
        }
    }

    /// Theme for the given color choice.
    pub fn for_colors(colors: bool) -> Self {
        if colors {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a changed item (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format an already-satisfied item (icon + text dimmed).
    pub fn format_satisfied(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("● {}", msg)))
    }

    /// Format a pending item.
    pub fn format_pending(&self, msg: &str) -> String {
        format!("{}", self.info.apply_to(format!("○ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("▲"),
            self.highlight.apply_to(title)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }

    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_status_icons() {
        let theme = RigupTheme::plain();
        assert_eq!(theme.format_success("tmux installed"), "✓ tmux installed");
        assert_eq!(theme.format_satisfied("git already present"), "● git already present");
        assert_eq!(theme.format_pending("jq would install"), "○ jq would install");
        assert_eq!(theme.format_warning("no manager"), "⚠ no manager");
        assert_eq!(theme.format_error("failed"), "✗ failed");
    }

    #[test]
    fn theme_formats_header() {
        let theme = RigupTheme::plain();
        let msg = theme.format_header("rigup");
        assert!(msg.contains("rigup"));
        assert!(msg.contains("▲"));
    }

    #[test]
    fn no_color_flag_disables_colors() {
        assert!(!should_use_colors(true));
    }

    #[test]
    fn colored_theme_creates_without_panic() {
        let theme = RigupTheme::for_colors(true);
        let _ = theme.format_success("test");
        let _ = theme.border.apply_to("│");
        let _ = theme.duration.apply_to("1.2s");
    }
}
