//! Font items: download an archive and copy its font files into the fonts dir.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::archive::{extract_archive, file_name_from_url, is_archive};
use crate::error::{RigupError, Result};
use crate::sys::find_files_with_extensions;

use super::context::{RunContext, RunState};
use super::outcome::Outcome;

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf"];

/// Download, extract and install a font family.
///
/// Every `.ttf`/`.otf` in the archive is copied into `dir`; afterwards each
/// listed file must exist there. On success the item is recorded so the
/// font cache is refreshed once at the end of the run.
pub fn install(
    ctx: &RunContext<'_>,
    state: &mut RunState,
    name: &str,
    url: &str,
    dir: &Path,
    files: &[String],
) -> Result<Outcome> {
    let temp = TempDir::new()?;
    let download = temp.path().join(file_name_from_url(url));
    let bytes = ctx.host.download(url, &download)?;
    tracing::debug!("Downloaded {} ({} bytes)", url, bytes);

    let fonts = if is_archive(url) {
        let unpacked = temp.path().join("unpacked");
        fs::create_dir_all(&unpacked)?;
        extract_archive(&download, &unpacked)?;
        find_files_with_extensions(&unpacked, FONT_EXTENSIONS)
    } else {
        find_files_with_extensions(temp.path(), FONT_EXTENSIONS)
    };

    if fonts.is_empty() {
        return Err(RigupError::ArchiveFailed {
            archive: url.to_string(),
            message: "no .ttf or .otf files found".to_string(),
        });
    }

    fs::create_dir_all(dir).map_err(|e| RigupError::WriteFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;
    for font in &fonts {
        copy_into(font, dir)?;
    }

    let missing: Vec<&str> = files
        .iter()
        .filter(|file| !dir.join(file.as_str()).exists())
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        return Ok(Outcome::Failed {
            error: format!(
                "archive from {} did not contain {}",
                url,
                missing.join(", ")
            ),
        });
    }

    state.fonts_installed.push(name.to_string());
    let detail = format!("installed {} font files into {}", fonts.len(), dir.display());
    tracing::info!("{}: {}", name, detail);
    Ok(Outcome::Changed { detail })
}

/// Describe what an install would do.
pub fn preview(url: &str, dir: &Path) -> Outcome {
    Outcome::Pending {
        detail: format!("would download {} into {}", url, dir.display()),
    }
}

fn copy_into(font: &Path, dir: &Path) -> Result<PathBuf> {
    let file_name = font.file_name().ok_or_else(|| RigupError::ArchiveFailed {
        archive: font.display().to_string(),
        message: "font entry has no file name".to_string(),
    })?;
    let target = dir.join(file_name);
    fs::copy(font, &target).map_err(|e| RigupError::WriteFailed {
        path: target.clone(),
        source: e,
    })?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockHost;

    const URL: &str = "https://example.com/Mono.tar.xz";

    fn font_tarball(names: &[&str]) -> Vec<u8> {
        let temp = TempDir::new().unwrap();
        let stage = temp.path().join("stage");
        fs::create_dir_all(stage.join("sub")).unwrap();
        for name in names {
            fs::write(stage.join("sub").join(name), b"font").unwrap();
        }
        fs::write(stage.join("README.md"), b"readme").unwrap();
        let archive = temp.path().join("fonts.tar");
        let status = std::process::Command::new("tar")
            .arg("-cf")
            .arg(&archive)
            .arg("-C")
            .arg(&stage)
            .arg(".")
            .status()
            .unwrap();
        assert!(status.success());
        fs::read(&archive).unwrap()
    }

    #[test]
    fn installs_fonts_and_records_them() {
        let fonts = TempDir::new().unwrap();
        let dir = fonts.path().join("share/fonts");
        let host = MockHost::new().with_download(
            URL,
            font_tarball(&["Mono-Regular.ttf", "Mono-Bold.ttf", "Mono-Italic.otf"]),
        );
        let ctx = RunContext::new(&host, None, fonts.path(), false);
        let mut state = RunState::default();

        let outcome = install(
            &ctx,
            &mut state,
            "mono",
            URL,
            &dir,
            &["Mono-Regular.ttf".to_string()],
        )
        .unwrap();

        assert!(matches!(outcome, Outcome::Changed { .. }));
        assert!(dir.join("Mono-Regular.ttf").exists());
        assert!(dir.join("Mono-Italic.otf").exists());
        assert!(!dir.join("README.md").exists());
        assert_eq!(state.fonts_installed, vec!["mono".to_string()]);
    }

    #[test]
    fn missing_listed_file_fails_without_recording() {
        let fonts = TempDir::new().unwrap();
        let host = MockHost::new().with_download(URL, font_tarball(&["Other.ttf"]));
        let ctx = RunContext::new(&host, None, fonts.path(), false);
        let mut state = RunState::default();

        let outcome = install(
            &ctx,
            &mut state,
            "mono",
            URL,
            fonts.path(),
            &["Mono-Regular.ttf".to_string()],
        )
        .unwrap();

        match outcome {
            Outcome::Failed { error } => assert!(error.contains("Mono-Regular.ttf")),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(state.fonts_installed.is_empty());
    }

    #[test]
    fn archive_url_with_query_is_extracted() {
        let url = "https://example.com/Mono.tar.xz?download=1";
        let fonts = TempDir::new().unwrap();
        let host = MockHost::new().with_download(url, font_tarball(&["Mono-Regular.ttf"]));
        let ctx = RunContext::new(&host, None, fonts.path(), false);
        let mut state = RunState::default();

        let outcome = install(
            &ctx,
            &mut state,
            "mono",
            url,
            fonts.path(),
            &["Mono-Regular.ttf".to_string()],
        )
        .unwrap();

        assert!(matches!(outcome, Outcome::Changed { .. }));
        assert_eq!(fs::read(fonts.path().join("Mono-Regular.ttf")).unwrap(), b"font");
    }

    #[test]
    fn download_failure_propagates() {
        let fonts = TempDir::new().unwrap();
        let host = MockHost::new();
        let ctx = RunContext::new(&host, None, fonts.path(), false);
        let mut state = RunState::default();

        let err = install(&ctx, &mut state, "mono", URL, fonts.path(), &[]).unwrap_err();
        assert!(matches!(err, RigupError::DownloadFailed { .. }));
    }

    #[test]
    fn archive_without_fonts_is_archive_failed() {
        let fonts = TempDir::new().unwrap();
        let host = MockHost::new().with_download(URL, font_tarball(&[]));
        let ctx = RunContext::new(&host, None, fonts.path(), false);
        let mut state = RunState::default();

        let err = install(&ctx, &mut state, "mono", URL, fonts.path(), &[]).unwrap_err();
        assert!(matches!(err, RigupError::ArchiveFailed { .. }));
    }
}
