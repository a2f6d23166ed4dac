//! Mock host for testing.
//!
//! `MockHost` simulates just enough of a workstation to drive the
//! reconciler: executables on PATH, a package database that apt/dnf
//! commands update, global git config, and canned downloads. Every command
//! and download is recorded for later assertion.
//!
//! # Example
//!
//! ```
//! use rigup::host::{Host, MockHost};
//!
//! let host = MockHost::new()
//!     .with_tool("apt-get")
//!     .with_package("ripgrep", Some("rg"));
//!
//! assert!(host.which("rg").is_none());
//! host.run("sudo env DEBIAN_FRONTEND=noninteractive apt-get install -y ripgrep").unwrap();
//! assert!(host.which("rg").is_some());
//! assert_eq!(host.commands().len(), 1);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{RigupError, Result};
use crate::shell::CommandResult;

use super::Host;

/// Simulated system for tests.
#[derive(Debug, Default)]
pub struct MockHost {
    tools: RefCell<HashMap<String, PathBuf>>,
    installed: RefCell<HashSet<String>>,
    /// Installable packages and the executable each one provides.
    available: HashMap<String, Option<String>>,
    git_config: RefCell<HashMap<String, String>>,
    downloads: HashMap<String, Vec<u8>>,
    /// Substring of a command → tool it puts on PATH when run.
    command_effects: Vec<(String, String)>,
    failing: Vec<String>,
    commands: RefCell<Vec<String>>,
    fetched: RefCell<Vec<String>>,
}

impl MockHost {
    /// Create an empty system: nothing on PATH, nothing installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an executable on PATH.
    pub fn with_tool(self, tool: &str) -> Self {
        self.tools
            .borrow_mut()
            .insert(tool.to_string(), PathBuf::from("/usr/bin").join(tool));
        self
    }

    /// Make a package installable; installing it puts `tool` on PATH.
    pub fn with_package(mut self, package: &str, tool: Option<&str>) -> Self {
        self.available
            .insert(package.to_string(), tool.map(str::to_string));
        self
    }

    /// Mark a package as already installed (and its tool, if any, on PATH).
    pub fn with_installed_package(self, package: &str) -> Self {
        self.installed.borrow_mut().insert(package.to_string());
        if let Some(Some(tool)) = self.available.get(package) {
            let tool = tool.clone();
            return self.with_tool(&tool);
        }
        self
    }

    /// Preset a global git config value.
    pub fn with_git_config(self, key: &str, value: &str) -> Self {
        self.git_config
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Serve `body` for downloads of `url`.
    pub fn with_download(mut self, url: &str, body: Vec<u8>) -> Self {
        self.downloads.insert(url.to_string(), body);
        self
    }

    /// Any command containing `needle` puts `tool` on PATH.
    pub fn with_command_effect(mut self, needle: &str, tool: &str) -> Self {
        self.command_effects
            .push((needle.to_string(), tool.to_string()));
        self
    }

    /// Any command containing `needle` exits with status 1.
    pub fn with_failing_command(mut self, needle: &str) -> Self {
        self.failing.push(needle.to_string());
        self
    }

    /// All commands run, in order.
    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }

    /// Whether any command containing `needle` was run.
    pub fn ran(&self, needle: &str) -> bool {
        self.commands.borrow().iter().any(|c| c.contains(needle))
    }

    /// Commands that change the system (installs, config writes, scripts).
    ///
    /// Read-only probes (package queries, `git config --get`) are excluded.
    pub fn mutating_commands(&self) -> Vec<String> {
        self.commands
            .borrow()
            .iter()
            .filter(|c| !is_query(c))
            .cloned()
            .collect()
    }

    /// All URLs downloaded, in order.
    pub fn downloads(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }

    /// Whether a package is installed.
    pub fn is_installed(&self, package: &str) -> bool {
        self.installed.borrow().contains(package)
    }

    /// Current global git config value.
    pub fn git_config_value(&self, key: &str) -> Option<String> {
        self.git_config.borrow().get(key).cloned()
    }

    fn install(&self, package: &str) -> CommandResult {
        match self.available.get(package) {
            Some(tool) => {
                self.installed.borrow_mut().insert(package.to_string());
                if let Some(tool) = tool {
                    self.add_tool(tool);
                }
                ok(String::new())
            }
            None => fail(100, format!("E: Unable to locate package {}", package)),
        }
    }

    fn add_tool(&self, tool: &str) {
        self.tools
            .borrow_mut()
            .insert(tool.to_string(), PathBuf::from("/usr/bin").join(tool));
    }
}

impl Host for MockHost {
    fn which(&self, tool: &str) -> Option<PathBuf> {
        self.tools.borrow().get(tool).cloned()
    }

    fn run(&self, command: &str) -> Result<CommandResult> {
        self.commands.borrow_mut().push(command.to_string());

        if self.failing.iter().any(|needle| command.contains(needle)) {
            return Ok(fail(1, format!("simulated failure: {}", command)));
        }

        let words = split_words(command);
        let last = words.last().cloned().unwrap_or_default();

        if command.contains("dpkg-query") {
            return Ok(if self.is_installed(&last) {
                ok("install ok installed".to_string())
            } else {
                fail(1, format!("dpkg-query: no packages found matching {}", last))
            });
        }
        if command.contains("rpm -q") {
            return Ok(if self.is_installed(&last) {
                ok(format!("{}-1.0-1.x86_64\n", last))
            } else {
                fail(1, format!("package {} is not installed", last))
            });
        }
        if command.contains("apt-get install") || command.contains("dnf install") {
            return Ok(self.install(&last));
        }
        if let Some(pos) = words.iter().position(|w| w == "--global") {
            let args = &words[pos + 1..];
            return Ok(match args {
                [flag, key] if flag == "--get" => match self.git_config_value(key) {
                    Some(value) => ok(format!("{}\n", value)),
                    None => fail(1, String::new()),
                },
                [key, value] => {
                    self.git_config
                        .borrow_mut()
                        .insert(key.clone(), value.clone());
                    ok(String::new())
                }
                _ => fail(129, "usage: git config".to_string()),
            });
        }

        for (needle, tool) in &self.command_effects {
            if command.contains(needle.as_str()) {
                self.add_tool(tool);
            }
        }
        Ok(ok(String::new()))
    }

    fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        self.fetched.borrow_mut().push(url.to_string());
        match self.downloads.get(url) {
            Some(body) => {
                std::fs::write(dest, body)?;
                Ok(body.len() as u64)
            }
            None => Err(RigupError::DownloadFailed {
                url: url.to_string(),
                message: "HTTP 404 Not Found".to_string(),
            }),
        }
    }
}

fn ok(stdout: String) -> CommandResult {
    CommandResult::success(stdout, String::new(), Duration::ZERO)
}

fn fail(code: i32, stderr: String) -> CommandResult {
    CommandResult::failure(Some(code), String::new(), stderr, Duration::ZERO)
}

fn is_query(command: &str) -> bool {
    command.contains("dpkg-query") || command.contains("rpm -q") || command.contains("--get")
}

/// Split a command into words, honoring the single quotes `shell_quote` emits.
fn split_words(command: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_word = false;
    let mut chars = command.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_quotes = !in_quotes;
                has_word = true;
            }
            '\\' if !in_quotes => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                    has_word = true;
                }
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_word {
                    words.push(std::mem::take(&mut current));
                    has_word = false;
                }
            }
            c => {
                current.push(c);
                has_word = true;
            }
        }
    }
    if has_word {
        words.push(current);
    }
    words
}
