//! HTTP archive downloading.
//!
//! Provides a blocking HTTP client that streams release archives to disk.

use reqwest::blocking::Client;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::error::{BuildpackError, Result};

/// Downloads release archives over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with the default 300-second timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new HTTP fetcher with custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("vault-buildpack/", env!("CARGO_PKG_VERSION")))
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            timeout,
        }
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Download `url` into `dest`, returning the number of bytes written.
    ///
    /// Non-success statuses, connection errors and bodies shorter than the
    /// advertised `Content-Length` are all reported as transfer failures.
    /// `dest` may hold partial content on failure; callers own its cleanup.
    pub fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        debug!("GET {} (timeout {:?})", url, self.timeout());
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| BuildpackError::transfer(url, e))?;

        if !response.status().is_success() {
            return Err(BuildpackError::transfer(
                url,
                format!("HTTP {}", response.status()),
            ));
        }

        let expected = response.content_length();

        let mut file = File::create(dest).map_err(|e| BuildpackError::fs_at("create", dest, e))?;
        let written = response
            .copy_to(&mut file)
            .map_err(|e| BuildpackError::transfer(url, e))?;
        file.flush()
            .map_err(|e| BuildpackError::fs_at("write", dest, e))?;

        if let Some(expected) = expected {
            if written != expected {
                return Err(BuildpackError::transfer(
                    url,
                    format!("truncated body: expected {} bytes, got {}", expected, written),
                ));
            }
        }

        debug!("Downloaded {} bytes to {}", written, dest.display());
        Ok(written)
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_timeout_is_300_seconds() {
        let fetcher = HttpFetcher::new();
        assert_eq!(fetcher.timeout(), Duration::from_secs(300));
    }

    #[test]
    fn custom_timeout() {
        let fetcher = HttpFetcher::with_timeout(Duration::from_secs(60));
        assert_eq!(fetcher.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn default_creates_fetcher() {
        let fetcher = HttpFetcher::default();
        assert_eq!(fetcher.timeout(), Duration::from_secs(300));
    }

    #[test]
    fn downloads_body_to_file() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/1.2.3/vault_1.2.3_linux_amd64.zip");
            then.status(200).body("archive-bytes");
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("download.zip");
        let fetcher = HttpFetcher::new();

        let written = fetcher
            .download(&server.url("/1.2.3/vault_1.2.3_linux_amd64.zip"), &dest)
            .unwrap();

        mock.assert();
        assert_eq!(written, 13);
        assert_eq!(fs::read(&dest).unwrap(), b"archive-bytes");
    }

    #[test]
    fn non_success_status_is_transfer_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing.zip");
            then.status(404);
        });

        let temp = TempDir::new().unwrap();
        let fetcher = HttpFetcher::new();
        let url = server.url("/missing.zip");

        let err = fetcher
            .download(&url, &temp.path().join("download.zip"))
            .unwrap_err();

        match err {
            BuildpackError::TransferFailure { url: failed, message } => {
                assert_eq!(failed, url);
                assert!(message.contains("404"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn connection_failure_is_transfer_failure() {
        let temp = TempDir::new().unwrap();
        let fetcher = HttpFetcher::with_timeout(Duration::from_secs(5));

        // Port 9 (discard) is not expected to accept HTTP connections.
        let err = fetcher
            .download("http://127.0.0.1:9/vault.zip", &temp.path().join("download.zip"))
            .unwrap_err();

        assert!(matches!(err, BuildpackError::TransferFailure { .. }));
    }
}
