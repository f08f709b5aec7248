//! Placement of the cached binary into the build workspace.
//!
//! Other buildpacks and the application rely on the fixed layout
//! `<build_root>/.vault-buildpack/vault`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BuildpackError, Result};
use crate::fetch::archive::make_executable;

/// Directory under the build root that holds the installed binary.
pub const INSTALL_DIR: &str = ".vault-buildpack";

/// File name of the installed binary.
pub const BINARY_NAME: &str = "vault";

/// Location of an installed binary, handed to the profile writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledBinary {
    /// Full path of the installed executable.
    pub path: PathBuf,
    /// Directory containing the executable.
    pub dir: PathBuf,
}

/// Copies cached artifacts into a build workspace.
#[derive(Debug, Clone)]
pub struct Installer {
    build_root: PathBuf,
}

impl Installer {
    /// Create an installer targeting `build_root`.
    pub fn new(build_root: impl Into<PathBuf>) -> Self {
        Self {
            build_root: build_root.into(),
        }
    }

    /// Directory the binary is installed into.
    pub fn install_dir(&self) -> PathBuf {
        self.build_root.join(INSTALL_DIR)
    }

    /// Copy `cached` into the workspace, replacing any earlier copy, and
    /// mark it executable.
    pub fn install(&self, cached: &Path) -> Result<InstalledBinary> {
        let dir = self.install_dir();
        fs::create_dir_all(&dir).map_err(|e| BuildpackError::fs_at("create", &dir, e))?;

        let path = dir.join(BINARY_NAME);
        let bytes = fs::copy(cached, &path).map_err(|e| {
            BuildpackError::fs(
                format!("Failed to copy {} to {}", cached.display(), path.display()),
                e,
            )
        })?;
        make_executable(&path)?;
        debug!("Installed {} bytes at {}", bytes, path.display());

        Ok(InstalledBinary { path, dir })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cached_file(temp: &TempDir, contents: &[u8]) -> PathBuf {
        let path = temp.path().join("vault_1.2.3");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn installs_at_fixed_location() {
        let temp = TempDir::new().unwrap();
        let cached = cached_file(&temp, b"vault-binary");
        let build = temp.path().join("build");
        fs::create_dir(&build).unwrap();

        let installed = Installer::new(&build).install(&cached).unwrap();

        assert_eq!(installed.path, build.join(".vault-buildpack").join("vault"));
        assert_eq!(installed.dir, build.join(".vault-buildpack"));
        assert_eq!(fs::read(&installed.path).unwrap(), b"vault-binary");
    }

    #[test]
    fn overwrites_previous_copy() {
        let temp = TempDir::new().unwrap();
        let build = temp.path().join("build");
        let dir = build.join(INSTALL_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(BINARY_NAME), b"stale").unwrap();
        let cached = cached_file(&temp, b"fresh");

        let installed = Installer::new(&build).install(&cached).unwrap();

        assert_eq!(fs::read(&installed.path).unwrap(), b"fresh");
    }

    #[cfg(unix)]
    #[test]
    fn sets_execute_permission() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let cached = cached_file(&temp, b"binary");
        fs::set_permissions(&cached, fs::Permissions::from_mode(0o644)).unwrap();

        let installed = Installer::new(temp.path().join("build"))
            .install(&cached)
            .unwrap();

        let mode = fs::metadata(&installed.path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn missing_cached_artifact_is_filesystem_failure() {
        let temp = TempDir::new().unwrap();

        let err = Installer::new(temp.path())
            .install(&temp.path().join("absent"))
            .unwrap_err();

        assert!(matches!(err, BuildpackError::FilesystemFailure { .. }));
    }
}
