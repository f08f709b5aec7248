//! Zip archive extraction.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::{BuildpackError, Result};

/// Extract the file entry named `entry` from the zip at `archive` into `dest`.
///
/// The entry may sit at the archive root or inside a directory; only its
/// file name is compared. `dest` is written, flushed to disk and marked
/// executable. Returns the number of bytes extracted.
pub fn extract_entry(archive: &Path, entry: &str, dest: &Path) -> Result<u64> {
    let file = File::open(archive).map_err(|e| BuildpackError::fs_at("open", archive, e))?;
    let mut zip = zip::ZipArchive::new(file)
        .map_err(|e| BuildpackError::archive(format!("Failed to open zip: {}", e)))?;

    let index = find_entry(&mut zip, entry)?.ok_or_else(|| {
        BuildpackError::archive(format!("Binary '{}' not found in archive", entry))
    })?;

    let mut source = zip
        .by_index(index)
        .map_err(|e| BuildpackError::archive(format!("Failed to read zip entry: {}", e)))?;
    debug!("Extracting {} to {}", source.name(), dest.display());

    let mut out = File::create(dest).map_err(|e| BuildpackError::fs_at("create", dest, e))?;
    let written = io::copy(&mut source, &mut out).map_err(|e| {
        // Checksum and inflate errors surface as IO errors from the reader.
        BuildpackError::archive(format!("Failed to extract '{}': {}", entry, e))
    })?;
    out.sync_all()
        .map_err(|e| BuildpackError::fs_at("flush", dest, e))?;

    make_executable(dest)?;
    Ok(written)
}

fn find_entry<R: io::Read + io::Seek>(
    zip: &mut zip::ZipArchive<R>,
    entry: &str,
) -> Result<Option<usize>> {
    for i in 0..zip.len() {
        let file = zip
            .by_index_raw(i)
            .map_err(|e| BuildpackError::archive(format!("Failed to read zip entry: {}", e)))?;
        if file.is_dir() {
            continue;
        }
        let matches = Path::new(file.name())
            .file_name()
            .is_some_and(|name| name == entry);
        if matches {
            return Ok(Some(i));
        }
    }
    Ok(None)
}

/// Set mode 0o755 on `path`.
#[cfg(unix)]
pub(crate) fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)
        .map_err(|e| BuildpackError::fs_at("stat", path, e))?
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).map_err(|e| BuildpackError::fs_at("chmod", path, e))
}

#[cfg(not(unix))]
pub(crate) fn make_executable(path: &Path) -> Result<()> {
    fs::metadata(path)
        .map(|_| ())
        .map_err(|e| BuildpackError::fs_at("stat", path, e))
}
