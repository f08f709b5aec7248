//! Cache storage implementation.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ReleaseSource;
use crate::error::{BuildpackError, Result};
use crate::fetch::{extract_entry, HttpFetcher};

/// Storage for extracted release binaries, keyed by version.
///
/// Presence of `<root>/vault_<version>` is the only cache-hit signal.
/// Entries are never rewritten or evicted; the platform owns the lifetime
/// of the cache directory. The key covers the version only, so the store
/// assumes a single platform and architecture.
pub struct CacheStore {
    /// Root directory for cache.
    root: PathBuf,
}

/// A cache lookup result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedArtifact {
    /// Path of the cache entry.
    pub path: PathBuf,
    /// Whether the entry was downloaded during this lookup.
    pub fetched: bool,
}

impl CacheStore {
    /// Create a new cache store.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Cache key for a version.
    pub fn key(version: &str) -> String {
        format!("vault_{}", version)
    }

    /// Get the path of the entry for `version`.
    pub fn entry_path(&self, version: &str) -> PathBuf {
        self.root.join(Self::key(version))
    }

    /// Ensure the cache directory exists.
    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .map_err(|e| BuildpackError::fs_at("create cache directory", &self.root, e))
    }

    /// Return the cached entry for `version`, if present.
    pub fn lookup(&self, version: &str) -> Option<PathBuf> {
        let path = self.entry_path(version);
        path.is_file().then_some(path)
    }

    /// Return the entry for `version`, downloading it on a miss.
    pub fn ensure_cached(
        &self,
        version: &str,
        source: &ReleaseSource,
        fetcher: &HttpFetcher,
    ) -> Result<CachedArtifact> {
        self.ensure_dir()?;

        if let Some(path) = self.lookup(version) {
            debug!("Cache hit for {} at {}", version, path.display());
            return Ok(CachedArtifact {
                path,
                fetched: false,
            });
        }

        debug!("Cache miss for {}", version);
        let path = self.populate(version, source, fetcher)?;
        Ok(CachedArtifact {
            path,
            fetched: true,
        })
    }

    /// Download and extract `version`, then commit it to the cache.
    ///
    /// The archive and the extracted binary are staged as temporary files in
    /// the cache root and the binary is renamed onto the entry path, so a
    /// concurrent reader sees either no entry or a complete one.
    pub fn populate(
        &self,
        version: &str,
        source: &ReleaseSource,
        fetcher: &HttpFetcher,
    ) -> Result<PathBuf> {
        self.ensure_dir()?;
        self.sweep_stale_staging()?;

        let key = Self::key(version);
        let archive = StagingFile::new(self.staging_path(&key, "zip"));
        let binary = StagingFile::new(self.staging_path(&key, "bin"));

        let url = source.archive_url(version);
        fetcher.download(&url, archive.path())?;
        extract_entry(archive.path(), source.entry_name(), binary.path())?;

        let entry = self.entry_path(version);
        binary.commit(&entry)?;
        debug!("Cached {} at {}", version, entry.display());

        Ok(entry)
    }

    fn staging_path(&self, key: &str, suffix: &str) -> PathBuf {
        self.root
            .join(format!(".{}.{}.{}.part", key, std::process::id(), suffix))
    }

    /// Remove staging files left behind by builds that were killed mid-fetch.
    ///
    /// Files staged by the current process are kept. Returns the number of
    /// files removed.
    fn sweep_stale_staging(&self) -> Result<usize> {
        let entries = fs::read_dir(&self.root)
            .map_err(|e| BuildpackError::fs_at("read cache directory", &self.root, e))?;

        let own_pid = std::process::id();
        let mut removed = 0;
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(pid) = name.to_str().and_then(staging_pid) else {
                continue;
            };
            if pid == own_pid {
                continue;
            }
            let path = entry.path();
            match fs::remove_file(&path) {
                Ok(()) => {
                    debug!("Removed stale staging file {}", path.display());
                    removed += 1;
                }
                Err(e) => debug!("Could not remove {}: {}", path.display(), e),
            }
        }
        Ok(removed)
    }
}

/// Parse the owning pid out of a `.vault_<version>.<pid>.<suffix>.part` name.
fn staging_pid(name: &str) -> Option<u32> {
    let stem = name.strip_prefix(".vault_")?.strip_suffix(".part")?;
    let mut parts = stem.rsplitn(3, '.');
    let _suffix = parts.next()?;
    let pid = parts.next()?;
    parts.next()?;
    pid.parse().ok()
}

/// A temporary file that is removed on drop unless committed.
struct StagingFile {
    path: PathBuf,
    committed: bool,
}

impl StagingFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            committed: false,
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    /// Atomically move the staged file to `dest`.
    fn commit(mut self, dest: &Path) -> Result<()> {
        fs::rename(&self.path, dest).map_err(|e| {
            BuildpackError::fs(
                format!(
                    "Failed to move {} into place at {}",
                    self.path.display(),
                    dest.display()
                ),
                e,
            )
        })?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagingFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.path);
        }
    }
}
