//! Git-config items: set the global keys whose value differs.

use crate::detection::probe::git_config_get;
use crate::error::Result;
use crate::host::Host;
use crate::shell::shell_quote;

use super::outcome::Outcome;

fn git_missing() -> Outcome {
    Outcome::Unavailable {
        reason: "git is not installed; install git and run again to apply git settings"
            .to_string(),
    }
}

/// Keys whose current global value differs from the desired one.
fn differing<'a>(host: &dyn Host, settings: &'a [(String, String)]) -> Vec<&'a (String, String)> {
    settings
        .iter()
        .filter(|(key, value)| git_config_get(host, key).as_deref() != Some(value.as_str()))
        .collect()
}

/// Set every differing key with `git config --global`.
pub fn apply(host: &dyn Host, settings: &[(String, String)]) -> Result<Outcome> {
    if host.which("git").is_none() {
        tracing::warn!("git not found; skipping git config");
        return Ok(git_missing());
    }

    let changes = differing(host, settings);
    if changes.is_empty() {
        return Ok(Outcome::Satisfied);
    }

    let mut keys = Vec::with_capacity(changes.len());
    for (key, value) in changes {
        let command = format!(
            "git config --global {} {}",
            shell_quote(key),
            shell_quote(value)
        );
        host.run(&command)?.into_checked(&command)?;
        keys.push(key.as_str());
    }

    let detail = format!("set {}", keys.join(", "));
    tracing::info!("git config: {}", detail);
    Ok(Outcome::Changed { detail })
}

/// Describe which keys would be set.
pub fn preview(host: &dyn Host, settings: &[(String, String)]) -> Outcome {
    if host.which("git").is_none() {
        return git_missing();
    }
    let keys: Vec<&str> = differing(host, settings)
        .into_iter()
        .map(|(key, _)| key.as_str())
        .collect();
    Outcome::Pending {
        detail: format!("would set {}", keys.join(", ")),
    }
}
