//! HTTP downloads for fonts, release archives and install scripts.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use std::fs::File;
use std::io;
use std::path::Path;
use std::time::Duration;

/// Default timeout for a single download.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Downloads files over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a new fetcher with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a new fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("rigup/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Stream the body at `url` into `dest`, returning the number of bytes written.
    ///
    /// Redirects are followed, which is what GitHub's
    /// `releases/latest/download/...` URLs rely on.
    pub fn download_to(&self, url: &str, dest: &Path) -> Result<u64> {
        let mut response = self.client.get(url).send()?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        let mut file =
            File::create(dest).with_context(|| format!("Failed to create {}", dest.display()))?;
        let written = io::copy(&mut response, &mut file)
            .with_context(|| format!("Failed to write {}", dest.display()))?;

        tracing::debug!("Downloaded {} bytes from {}", written, url);
        Ok(written)
    }
}
