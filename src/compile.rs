//! The compile pipeline.
//!
//! Reads the configured version, makes sure the matching release is in the
//! cache, installs it into the build directory and wires it onto PATH. Each
//! step consumes the previous step's output; the first failure aborts.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::cache::CacheStore;
use crate::config::{EnvDir, InstallerSettings, VERSION_VAR};
use crate::error::Result;
use crate::fetch::HttpFetcher;
use crate::install::{InstalledBinary, Installer};
use crate::profile::{ProfileFragment, ProfileWriter};
use crate::ui::UserInterface;

/// The three directories handed over by the build platform.
#[derive(Debug, Clone)]
pub struct CompileDirs {
    /// Application build directory.
    pub build: PathBuf,
    /// Cache directory persisted between builds.
    pub cache: PathBuf,
    /// Directory of config var files.
    pub env: PathBuf,
}

/// Everything a successful compile produced.
#[derive(Debug, Clone)]
pub struct CompileReport {
    /// Installed version, verbatim from config.
    pub version: String,
    /// Cache entry the binary was copied from.
    pub cache_entry: PathBuf,
    /// Whether the release was downloaded during this run.
    pub fetched: bool,
    /// Installed binary location.
    pub installed: InstalledBinary,
    /// PATH fragment that was written.
    pub profile: ProfileFragment,
}

/// Resolve settings from the env directory and run the pipeline.
///
/// `VAULT_VERSION` is read before the settings are resolved, so a missing
/// version fails before any network or cache access.
pub fn compile(
    dirs: &CompileDirs,
    host_override: Option<&str>,
    timeout_secs: u64,
    ui: &mut dyn UserInterface,
) -> Result<CompileReport> {
    let env = EnvDir::new(&dirs.env);
    let version = read_version(&env, ui)?;
    let settings = InstallerSettings::resolve(host_override, timeout_secs, &env)?;
    run(dirs, &version, &settings, ui)
}

/// Read and announce the configured version.
pub fn read_version(env: &EnvDir, ui: &mut dyn UserInterface) -> Result<String> {
    ui.topic("Reading Vault configuration");
    let mut vars = env.read_required(&[VERSION_VAR])?;
    let version = vars.remove(VERSION_VAR).unwrap_or_default();

    if version.trim() != version {
        ui.warning(&format!(
            "{} contains surrounding whitespace; it is used verbatim",
            VERSION_VAR
        ));
        ui.message(&format!("{}={:?}", VERSION_VAR, version));
    } else {
        ui.message(&format!("{}={}", VERSION_VAR, version));
    }
    Ok(version)
}

/// Run the cache, install and profile steps for `version`.
pub fn run(
    dirs: &CompileDirs,
    version: &str,
    settings: &InstallerSettings,
    ui: &mut dyn UserInterface,
) -> Result<CompileReport> {
    let cache = CacheStore::new(&dirs.cache);
    let fetcher = HttpFetcher::with_timeout(settings.timeout);

    ui.topic(&format!("Fetching Vault {}", version));
    let artifact = cache.ensure_cached(version, &settings.source, &fetcher)?;
    if artifact.fetched {
        ui.message(&format!(
            "Downloaded {}",
            settings.source.archive_url(version)
        ));
    } else {
        ui.message(&format!("Using cached copy at {}", artifact.path.display()));
    }
    debug!("Cache entry: {}", artifact.path.display());

    ui.topic("Installing Vault");
    let installed = Installer::new(&dirs.build).install(&artifact.path)?;
    ui.message(&format!("Installed to {}", installed.path.display()));

    ui.topic("Adding Vault to PATH");
    let profile = ProfileWriter::new(&dirs.build).write_fragment(&installed)?;
    if profile.appended {
        ui.message(&format!("Updated {}", profile.script.display()));
    } else {
        ui.message(&format!("{} already up to date", profile.script.display()));
    }

    info!(version, fetched = artifact.fetched, "Vault installed");
    Ok(CompileReport {
        version: version.to_string(),
        cache_entry: artifact.path,
        fetched: artifact.fetched,
        installed,
        profile,
    })
}
