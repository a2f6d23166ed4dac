//! Per-item outcomes and the run report.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::catalog::ItemKind;

/// What happened to one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Probe reported present; nothing was done.
    Satisfied,
    /// The item was installed or written this run.
    Changed { detail: String },
    /// Check-only mode: the item would change.
    Pending { detail: String },
    /// The item cannot be installed on this machine as configured.
    Unavailable { reason: String },
    /// Installing the item was attempted and failed.
    Failed { error: String },
}

impl Outcome {
    /// Whether this outcome fails the run.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }

    /// Whether the item is in its desired state after the run.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Outcome::Satisfied | Outcome::Changed { .. })
    }

    /// Short status label.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Satisfied => "satisfied",
            Outcome::Changed { .. } => "changed",
            Outcome::Pending { .. } => "pending",
            Outcome::Unavailable { .. } => "unavailable",
            Outcome::Failed { .. } => "failed",
        }
    }

    /// Detail text, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Outcome::Satisfied => None,
            Outcome::Changed { detail } | Outcome::Pending { detail } => Some(detail),
            Outcome::Unavailable { reason } => Some(reason),
            Outcome::Failed { error } => Some(error),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail() {
            Some(detail) => write!(f, "{}: {}", self.label(), detail),
            None => f.write_str(self.label()),
        }
    }
}

/// Outcome of one item, with its identity.
#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub name: String,
    pub kind: ItemKind,
    #[serde(flatten)]
    pub outcome: Outcome,
    #[serde(skip)]
    pub duration: Duration,
}

/// Counts per outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub satisfied: usize,
    pub changed: usize,
    pub pending: usize,
    pub unavailable: usize,
    pub failed: usize,
}

/// Everything a run did, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub items: Vec<ItemReport>,
    /// Items not attempted because `--fail-fast` stopped the run.
    pub not_attempted: Vec<String>,
    /// Font items installed this run.
    pub fonts_installed: Vec<String>,
    /// Warnings not tied to one item (font cache, unknown names).
    pub warnings: Vec<String>,
    pub duration: Duration,
}

impl RunReport {
    /// Count items per outcome.
    pub fn counts(&self) -> OutcomeCounts {
        let mut counts = OutcomeCounts::default();
        for item in &self.items {
            match item.outcome {
                Outcome::Satisfied => counts.satisfied += 1,
                Outcome::Changed { .. } => counts.changed += 1,
                Outcome::Pending { .. } => counts.pending += 1,
                Outcome::Unavailable { .. } => counts.unavailable += 1,
                Outcome::Failed { .. } => counts.failed += 1,
            }
        }
        counts
    }

    /// Items whose outcome is `Failed`.
    pub fn failed(&self) -> Vec<&ItemReport> {
        self.items.iter().filter(|i| i.outcome.is_failure()).collect()
    }

    /// Items that could not be installed here.
    pub fn unavailable(&self) -> Vec<&ItemReport> {
        self.items
            .iter()
            .filter(|i| matches!(i.outcome, Outcome::Unavailable { .. }))
            .collect()
    }

    /// Whether any item failed.
    pub fn has_failures(&self) -> bool {
        self.items.iter().any(|i| i.outcome.is_failure())
    }

    /// Whether every item was already satisfied.
    pub fn all_satisfied(&self) -> bool {
        self.not_attempted.is_empty()
            && self.items.iter().all(|i| i.outcome == Outcome::Satisfied)
    }

    /// Look up an item's report by name.
    pub fn get(&self, name: &str) -> Option<&ItemReport> {
        self.items.iter().find(|i| i.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str, outcome: Outcome) -> ItemReport {
        ItemReport {
            name: name.to_string(),
            kind: ItemKind::Package,
            outcome,
            duration: Duration::ZERO,
        }
    }

    #[test]
    fn counts_and_failures() {
        let run = RunReport {
            items: vec![
                report("git", Outcome::Satisfied),
                report("tmux", Outcome::Changed { detail: "installed".into() }),
                report("jq", Outcome::Failed { error: "exit 100".into() }),
                report("fd", Outcome::Unavailable { reason: "no manager".into() }),
            ],
            ..Default::default()
        };

        let counts = run.counts();
        assert_eq!(counts.satisfied, 1);
        assert_eq!(counts.changed, 1);
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.unavailable, 1);
        assert!(run.has_failures());
        assert!(!run.all_satisfied());
        assert_eq!(run.failed()[0].name, "jq");
        assert_eq!(run.unavailable()[0].name, "fd");
    }

    #[test]
    fn all_satisfied_requires_every_item_untouched() {
        let run = RunReport {
            items: vec![report("git", Outcome::Satisfied)],
            ..Default::default()
        };
        assert!(run.all_satisfied());
        assert!(!run.has_failures());
    }

    #[test]
    fn outcome_display() {
        assert_eq!(Outcome::Satisfied.to_string(), "satisfied");
        assert_eq!(
            Outcome::Changed { detail: "created".into() }.to_string(),
            "changed: created"
        );
    }

    #[test]
    fn item_report_serializes_flat() {
        let json = serde_json::to_value(report(
            "jq",
            Outcome::Pending { detail: "would install jq via apt".into() },
        ))
        .unwrap();
        assert_eq!(json["name"], "jq");
        assert_eq!(json["kind"], "package");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["detail"], "would install jq via apt");
    }
}
