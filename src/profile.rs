//! Startup fragment that puts the installed binary on the runtime PATH.
//!
//! The platform sources every script in `<app>/.profile.d/` when a dyno
//! starts. The build directory is mounted at `$HOME` at runtime, so paths
//! in the fragment are written relative to `$HOME` instead of the absolute
//! build-time path.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BuildpackError, Result};
use crate::install::InstalledBinary;

/// Startup hook directory under the build root.
pub const PROFILE_DIR: &str = ".profile.d";

/// Fragment file name inside [`PROFILE_DIR`].
pub const PROFILE_SCRIPT: &str = "vault.sh";

/// Writes the PATH fragment into a build workspace.
#[derive(Debug, Clone)]
pub struct ProfileWriter {
    build_root: PathBuf,
}

/// Outcome of writing the fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFragment {
    /// Script the line lives in.
    pub script: PathBuf,
    /// The export line.
    pub line: String,
    /// False when the script already contained the line.
    pub appended: bool,
}

impl ProfileWriter {
    /// Create a writer for `build_root`.
    pub fn new(build_root: impl Into<PathBuf>) -> Self {
        Self {
            build_root: build_root.into(),
        }
    }

    /// Path of the fragment script.
    pub fn script_path(&self) -> PathBuf {
        self.build_root.join(PROFILE_DIR).join(PROFILE_SCRIPT)
    }

    /// Export line adding `installed.dir` to PATH.
    pub fn export_line(&self, installed: &InstalledBinary) -> Result<String> {
        let relative = installed.dir.strip_prefix(&self.build_root).map_err(|_| {
            BuildpackError::fs(
                format!(
                    "Install directory {} is outside the build directory {}",
                    installed.dir.display(),
                    self.build_root.display()
                ),
                io::Error::from(io::ErrorKind::InvalidInput),
            )
        })?;

        Ok(format!(
            "export PATH=\"$HOME/{}/:$PATH\"",
            relative.to_string_lossy().trim_end_matches('/')
        ))
    }

    /// Append the export line to the fragment script.
    ///
    /// Existing content is kept. The line is not appended a second time when
    /// the script already contains it.
    pub fn write_fragment(&self, installed: &InstalledBinary) -> Result<ProfileFragment> {
        let line = self.export_line(installed)?;
        let dir = self.build_root.join(PROFILE_DIR);
        fs::create_dir_all(&dir).map_err(|e| BuildpackError::fs_at("create", &dir, e))?;

        let script = self.script_path();
        let existing = read_existing(&script)?;
        if existing.lines().any(|l| l == line) {
            debug!("{} already extends PATH", script.display());
            return Ok(ProfileFragment {
                script,
                line,
                appended: false,
            });
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&script)
            .map_err(|e| BuildpackError::fs_at("open", &script, e))?;

        let separator = if existing.is_empty() || existing.ends_with('\n') {
            ""
        } else {
            "\n"
        };
        writeln!(file, "{}{}", separator, line)
            .map_err(|e| BuildpackError::fs_at("append to", &script, e))?;
        debug!("Appended PATH export to {}", script.display());

        Ok(ProfileFragment {
            script,
            line,
            appended: true,
        })
    }
}

fn read_existing(script: &Path) -> Result<String> {
    match fs::read_to_string(script) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(BuildpackError::fs_at("read", script, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::INSTALL_DIR;
    use tempfile::TempDir;

    const EXPECTED_LINE: &str = "export PATH=\"$HOME/.vault-buildpack/:$PATH\"";

    fn installed_in(build: &Path) -> InstalledBinary {
        let dir = build.join(INSTALL_DIR);
        InstalledBinary {
            path: dir.join("vault"),
            dir,
        }
    }

    #[test]
    fn export_line_is_home_relative() {
        let temp = TempDir::new().unwrap();
        let writer = ProfileWriter::new(temp.path());

        let line = writer.export_line(&installed_in(temp.path())).unwrap();

        assert_eq!(line, EXPECTED_LINE);
        assert!(!line.contains(&*temp.path().to_string_lossy()));
    }

    #[test]
    fn export_line_rejects_foreign_directory() {
        let temp = TempDir::new().unwrap();
        let writer = ProfileWriter::new(temp.path().join("build"));

        let err = writer
            .export_line(&installed_in(&temp.path().join("elsewhere")))
            .unwrap_err();

        assert!(matches!(err, BuildpackError::FilesystemFailure { .. }));
    }

    #[test]
    fn creates_profile_directory_and_script() {
        let temp = TempDir::new().unwrap();
        let writer = ProfileWriter::new(temp.path());

        let fragment = writer.write_fragment(&installed_in(temp.path())).unwrap();

        assert!(fragment.appended);
        assert_eq!(fragment.script, temp.path().join(".profile.d").join("vault.sh"));
        assert_eq!(
            fs::read_to_string(&fragment.script).unwrap(),
            format!("{}\n", EXPECTED_LINE)
        );
    }

    #[test]
    fn appends_after_existing_content() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(PROFILE_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(PROFILE_SCRIPT), "export VAULT_ADDR=https://vault.internal").unwrap();
        let writer = ProfileWriter::new(temp.path());

        writer.write_fragment(&installed_in(temp.path())).unwrap();

        let content = fs::read_to_string(dir.join(PROFILE_SCRIPT)).unwrap();
        assert_eq!(
            content,
            format!("export VAULT_ADDR=https://vault.internal\n{}\n", EXPECTED_LINE)
        );
    }

    #[test]
    fn rerun_does_not_duplicate_line() {
        let temp = TempDir::new().unwrap();
        let writer = ProfileWriter::new(temp.path());
        let installed = installed_in(temp.path());

        writer.write_fragment(&installed).unwrap();
        let second = writer.write_fragment(&installed).unwrap();

        assert!(!second.appended);
        let content = fs::read_to_string(writer.script_path()).unwrap();
        assert_eq!(content.matches(EXPECTED_LINE).count(), 1);
    }
}
