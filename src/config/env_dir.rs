//! Config var directory reading.
//!
//! The build platform materialises each application config var as a file
//! inside the env directory: the file name is the variable name and the
//! file contents are the value.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{BuildpackError, Result};

/// Read access to a config var directory.
///
/// # Example
///
/// ```no_run
/// use vault_buildpack::config::EnvDir;
///
/// let env = EnvDir::new("/tmp/env");
/// let vars = env.read_required(&["VAULT_VERSION"]).unwrap();
/// println!("installing {}", vars["VAULT_VERSION"]);
/// ```
#[derive(Debug, Clone)]
pub struct EnvDir {
    root: PathBuf,
}

impl EnvDir {
    /// Create a reader for the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Read every variable in `names`, failing on the first absent one.
    ///
    /// Values are returned verbatim. An empty file counts as absent, and so
    /// does a missing directory: nothing is configured, so the first
    /// required name is reported.
    pub fn read_required(&self, names: &[&str]) -> Result<HashMap<String, String>> {
        if !self.root.is_dir() {
            debug!("Env directory {} does not exist", self.root.display());
            if let Some(first) = names.first() {
                return Err(BuildpackError::missing(*first));
            }
            return Ok(HashMap::new());
        }

        let mut vars = HashMap::with_capacity(names.len());
        for name in names {
            match self.read_optional(name)? {
                Some(value) => {
                    vars.insert((*name).to_string(), value);
                }
                None => return Err(BuildpackError::missing(*name)),
            }
        }

        Ok(vars)
    }

    /// Read a single variable, returning `None` when it is absent or empty.
    pub fn read_optional(&self, name: &str) -> Result<Option<String>> {
        let path = self.root.join(name);
        match fs::read_to_string(&path) {
            Ok(value) if value.is_empty() => {
                debug!("Config var {} is empty", name);
                Ok(None)
            }
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BuildpackError::fs_at("read config var", &path, e)),
        }
    }
}
