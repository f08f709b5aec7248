//! Resolved installer settings.
//!
//! Settings are layered: command-line options (and their environment
//! variables) win over config vars in the env directory, which win over
//! the built-in defaults.

use std::time::Duration;

use tracing::debug;

use super::env_dir::EnvDir;
use crate::error::Result;

/// Default location of the Vault release archives.
pub const DEFAULT_RELEASE_HOST: &str = "https://releases.hashicorp.com/vault";

/// Default fetch timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Config var holding the Vault version to install.
pub const VERSION_VAR: &str = "VAULT_VERSION";

/// Optional config var overriding the release host.
pub const RELEASE_HOST_VAR: &str = "VAULT_RELEASE_HOST";

/// Where release archives are fetched from and how they are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSource {
    /// Base URL; archives live at `<host>/<version>/<archive>`.
    pub host: String,
    /// Tool name, used for both the archive prefix and the entry inside it.
    pub tool: String,
    /// Platform suffix of the archive name.
    pub platform: String,
}

impl ReleaseSource {
    /// Create a source for the Vault linux/amd64 builds hosted at `host`.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            tool: "vault".to_string(),
            platform: "linux_amd64".to_string(),
        }
    }

    /// Archive file name for `version`.
    pub fn archive_name(&self, version: &str) -> String {
        format!("{}_{}_{}.zip", self.tool, version, self.platform)
    }

    /// Download URL of the archive for `version`.
    ///
    /// ```
    /// use vault_buildpack::config::ReleaseSource;
    ///
    /// let source = ReleaseSource::new("https://releases.hashicorp.com/vault/");
    /// assert_eq!(
    ///     source.archive_url("1.2.3"),
    ///     "https://releases.hashicorp.com/vault/1.2.3/vault_1.2.3_linux_amd64.zip"
    /// );
    /// ```
    pub fn archive_url(&self, version: &str) -> String {
        format!(
            "{}/{}/{}",
            self.host.trim_end_matches('/'),
            version,
            self.archive_name(version)
        )
    }

    /// Name of the executable entry inside the archive.
    pub fn entry_name(&self) -> &str {
        &self.tool
    }
}

impl Default for ReleaseSource {
    fn default() -> Self {
        Self::new(DEFAULT_RELEASE_HOST)
    }
}

/// Everything the pipeline needs besides the three directories.
#[derive(Debug, Clone)]
pub struct InstallerSettings {
    /// Release archive location.
    pub source: ReleaseSource,
    /// Timeout applied to the archive download.
    pub timeout: Duration,
}

impl InstallerSettings {
    /// Resolve settings from an explicit host override, the env directory
    /// and defaults.
    pub fn resolve(
        host_override: Option<&str>,
        timeout_secs: u64,
        env: &EnvDir,
    ) -> Result<Self> {
        let host = match host_override {
            Some(host) => host.to_string(),
            None => match env.read_optional(RELEASE_HOST_VAR)? {
                Some(host) => {
                    debug!("Using release host from {}", RELEASE_HOST_VAR);
                    host
                }
                None => DEFAULT_RELEASE_HOST.to_string(),
            },
        };

        Ok(Self {
            source: ReleaseSource::new(host),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Default for InstallerSettings {
    fn default() -> Self {
        Self {
            source: ReleaseSource::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
