//! Disk I/O and file lifecycle.
//!
//! Directory creation with explicit permission bits, create/truncate of output
//! files, and the scoped temp file used when concatenating archive parts.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Permission bits for directories we create (rwxr-xr-x).
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Suffix appended to the first part's path for the concatenated archive.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Path for the temp file: appends `.tmp` (e.g. `data.zip.001` → `data.zip.001.tmp`).
pub fn temp_path(first_part: &Path) -> PathBuf {
    let mut o = first_part.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Create `path` and any missing parents. On unix newly created directories get `mode`.
pub fn create_dir_all(path: &Path, mode: u32) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder
        .create(path)
        .map_err(|e| Error::io("create directory", path, e))
}

/// Create or truncate a regular file for writing.
pub fn create_file(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| Error::io("create", path, e))
}

/// Removes the file at `path` when dropped, on success and error paths alike.
pub struct RemoveOnDrop {
    path: PathBuf,
}

impl RemoveOnDrop {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RemoveOnDrop {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed temp file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to remove temp file"
                )
            }
        }
    }
}
