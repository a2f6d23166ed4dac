//! List command implementation.
//!
//! The `rigup list` command prints the layered catalog without probing.

use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::config;
use crate::error::Result;
use crate::ui::{OutputMode, Table, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    home: PathBuf,
    config: Option<PathBuf>,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(home: &Path, config: Option<&Path>) -> Self {
        Self {
            home: home.to_path_buf(),
            config: config.map(Path::to_path_buf),
        }
    }
}

/// Render the catalog as a table of name, kind, probe and action.
pub fn catalog_table(catalog: &Catalog, with_actions: bool) -> Table {
    let mut headers = vec!["Item", "Kind", "Probe"];
    if with_actions {
        headers.push("Action");
    }

    let mut table = Table::new(headers);
    for item in catalog.items() {
        let mut row = vec![
            item.name.clone(),
            item.kind().to_string(),
            item.probe.to_string(),
        ];
        if with_actions {
            row.push(item.action.describe());
        }
        table.add_row(row);
    }
    table
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let loaded = config::load(&self.home, self.config.as_deref())?;

        ui.show_header("Catalog");
        if ui.output_mode() == OutputMode::Verbose {
            ui.message(&format!("Config: {}", loaded.sources.join(", ")));
        }

        let verbose = ui.output_mode() == OutputMode::Verbose;
        ui.message(&catalog_table(&loaded.catalog, verbose).render());
        ui.message(&format!("{} items", loaded.catalog.len()));

        Ok(CommandResult::success())
    }
}
