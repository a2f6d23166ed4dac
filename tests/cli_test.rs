//! Integration tests for the rigup binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DOTFILES_CONFIG: &str = r#"
settings:
  manager: none
builtin: false
items:
  - kind: config_file
    name: editor-config
    path: ~/.config/editor/settings.toml
    content: "theme = \"dark\"\n"
  - kind: config_file
    name: aliases
    path: ~/.config/rigup/aliases.sh
    source: aliases.sh
  - kind: source_line
    name: aliases-source
    file: ~/.bashrc
    line: "[ -f ~/.config/rigup/aliases.sh ] && . ~/.config/rigup/aliases.sh"
"#;

/// Temp home with the dotfiles config written next to a `source:` fragment.
fn setup_home() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("rigup.yml"), DOTFILES_CONFIG).unwrap();
    fs::write(temp.path().join("aliases.sh"), "alias ll='ls -l'\n").unwrap();
    temp
}

fn rigup(home: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("rigup"));
    cmd.env("RIGUP_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(home.join("rigup.yml"));
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("rigup"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Idempotent development workstation provisioning"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("rigup"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_run_twice_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let home = setup_home();

    rigup(home.path())
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("editor-config created"))
        .stdout(predicate::str::contains("3 changed"));

    rigup(home.path())
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("editor-config already up to date"))
        .stdout(predicate::str::contains("aliases-source already sourced"))
        .stdout(predicate::str::contains("3 satisfied"));

    let bashrc = fs::read_to_string(home.path().join(".bashrc"))?;
    assert_eq!(bashrc.matches("aliases.sh ] &&").count(), 1);
    assert_eq!(
        fs::read_to_string(home.path().join(".config/rigup/aliases.sh"))?,
        "alias ll='ls -l'\n"
    );
    Ok(())
}

#[test]
fn cli_no_subcommand_runs() -> Result<(), Box<dyn std::error::Error>> {
    let home = setup_home();
    rigup(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary"));
    assert!(home.path().join(".config/editor/settings.toml").exists());
    Ok(())
}

#[test]
fn cli_run_only_selected_items() -> Result<(), Box<dyn std::error::Error>> {
    let home = setup_home();
    rigup(home.path())
        .args(["run", "--only", "editor-config,typo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown item 'typo'"));

    assert!(home.path().join(".config/editor/settings.toml").exists());
    assert!(!home.path().join(".bashrc").exists());
    Ok(())
}

#[test]
fn cli_status_exit_codes() -> Result<(), Box<dyn std::error::Error>> {
    let home = setup_home();

    rigup(home.path())
        .arg("status")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("would append to"));
    assert!(!home.path().join(".bashrc").exists());

    rigup(home.path()).arg("run").assert().success();

    rigup(home.path()).arg("status").assert().success();
    Ok(())
}

#[test]
fn cli_status_json() -> Result<(), Box<dyn std::error::Error>> {
    let home = setup_home();
    let output = rigup(home.path()).args(["status", "--json"]).output()?;
    assert_eq!(output.status.code(), Some(1));

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(doc["all_satisfied"], false);
    assert_eq!(doc["manager"], serde_json::Value::Null);
    assert_eq!(doc["counts"]["pending"], 3);
    assert_eq!(doc["items"][0]["name"], "editor-config");
    assert_eq!(doc["items"][0]["kind"], "config_file");
    assert_eq!(doc["items"][0]["status"], "pending");
    Ok(())
}

#[test]
fn cli_list_shows_items() -> Result<(), Box<dyn std::error::Error>> {
    let home = setup_home();
    rigup(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("aliases-source"))
        .stdout(predicate::str::contains("3 items"));
    Ok(())
}

#[test]
fn cli_list_builtin_catalog() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("rigup"));
    cmd.env("RIGUP_HOME", home.path()).env("NO_COLOR", "1");
    cmd.arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("starship"))
        .stdout(predicate::str::contains("bashrc-source"));
    Ok(())
}

#[test]
fn cli_missing_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("rigup"));
    cmd.env("RIGUP_HOME", home.path())
        .args(["--config", "does-not-exist.yml", "run"]);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("Configuration not found"));
    assert!(fs::read_dir(home.path())?.next().is_none());
    Ok(())
}

#[test]
fn cli_invalid_config_fails_before_changes() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let config = home.path().join("bad.yml");
    fs::write(
        &config,
        "builtin: false\nitems:\n  - kind: font\n    name: mono\n    url: https://example.com/m.zip\n    files: []\n",
    )?;

    let mut cmd = Command::new(cargo_bin("rigup"));
    cmd.env("RIGUP_HOME", home.path()).arg("--config").arg(&config);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("Invalid configuration"));
    Ok(())
}

#[test]
fn cli_user_config_layer_is_loaded() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let user_dir = home.path().join(".config/rigup");
    fs::create_dir_all(&user_dir)?;
    fs::write(
        user_dir.join("config.yml"),
        "builtin: false\nitems:\n  - kind: source_line\n    name: path-line\n    file: ~/.profile\n    line: export PATH=\"$HOME/.local/bin:$PATH\"\n",
    )?;

    let mut cmd = Command::new(cargo_bin("rigup"));
    cmd.env("RIGUP_HOME", home.path()).env("NO_COLOR", "1");
    cmd.arg("run").assert().success();

    let profile = fs::read_to_string(home.path().join(".profile"))?;
    assert!(profile.contains(".local/bin"));
    Ok(())
}

#[test]
fn cli_quiet_still_prints_summary() -> Result<(), Box<dyn std::error::Error>> {
    let home = setup_home();
    rigup(home.path())
        .args(["run", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("editor-config").not())
        .stdout(predicate::str::contains("3 changed"));
    Ok(())
}

const FAILING_CONFIG: &str = r#"
settings:
  manager: none
builtin: false
items:
  - kind: config_file
    name: blocked-config
    path: ~/blocker/settings.toml
    content: "a = 1\n"
  - kind: config_file
    name: after-config
    path: ~/after.toml
    content: "b = 2\n"
"#;

/// Temp home where `blocked-config` cannot be written: its parent is a file.
fn setup_failing_home() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("rigup.yml"), FAILING_CONFIG).unwrap();
    fs::write(temp.path().join("blocker"), "not a directory").unwrap();
    temp
}

#[test]
fn cli_run_failure_exits_one_and_continues() -> Result<(), Box<dyn std::error::Error>> {
    let home = setup_failing_home();

    rigup(home.path())
        .arg("run")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("blocked-config failed"))
        .stdout(predicate::str::contains("1 changed · 1 failed"));

    assert_eq!(fs::read_to_string(home.path().join("after.toml"))?, "b = 2\n");
    Ok(())
}

#[test]
fn cli_run_fail_fast_skips_later_items() -> Result<(), Box<dyn std::error::Error>> {
    let home = setup_failing_home();

    rigup(home.path())
        .args(["run", "--fail-fast"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("blocked-config failed"))
        .stdout(predicate::str::contains("not attempted: after-config"));

    assert!(!home.path().join("after.toml").exists());
    Ok(())
}
