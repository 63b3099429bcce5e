//! Zip extraction, including archives split into byte-range part files.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::storage::{self, RemoveOnDrop, DEFAULT_DIR_MODE};

/// Extract every entry of the zip at `archive_path` under `output_dir`, blocking until done.
///
/// Entries are processed in central-directory order. Directory entries are created
/// with their stored unix permission bits (or 0755); parents of file entries are
/// created as needed. Entries whose names would land outside `output_dir` are rejected.
pub fn extract_single(archive_path: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Result<()> {
    let archive_path = archive_path.as_ref();
    let output_dir = output_dir.as_ref();

    let file = File::open(archive_path).map_err(|e| Error::io("open", archive_path, e))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| Error::zip(archive_path, e))?;

    tracing::debug!(
        archive = %archive_path.display(),
        entries = archive.len(),
        "extracting zip"
    );

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| Error::zip(archive_path, e))?;
        let relative = entry
            .enclosed_name()
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::UnsafeEntryPath {
                archive: archive_path.to_path_buf(),
                name: entry.name().to_string(),
            })?;
        let out_path = output_dir.join(&relative);

        if entry.is_dir() {
            let mode = entry
                .unix_mode()
                .map(|m| m & 0o777)
                .filter(|m| *m != 0)
                .unwrap_or(DEFAULT_DIR_MODE);
            storage::create_dir_all(&out_path, mode)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            storage::create_dir_all(parent, DEFAULT_DIR_MODE)?;
        }
        let mut writer = storage::create_file(&out_path)?;
        copy_entry(&mut entry, &mut writer, archive_path, &out_path)?;
    }

    tracing::info!(
        archive = %archive_path.display(),
        output_dir = %output_dir.display(),
        entries = archive.len(),
        "zip extracted"
    );
    Ok(())
}

const COPY_BUF_SIZE: usize = 64 * 1024;

/// Streams one entry into `writer`.
///
/// Anything that goes wrong while reading the entry (bad deflate data, CRC
/// mismatch, truncation) is a zip error on `archive`; failures writing the
/// output are I/O errors on `out_path`.
fn copy_entry(
    entry: &mut impl Read,
    writer: &mut impl Write,
    archive: &Path,
    out_path: &Path,
) -> Result<u64> {
    let mut buf = vec![0u8; COPY_BUF_SIZE];
    let mut total = 0u64;
    loop {
        let n = match entry.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(Error::Zip {
                    path: archive.to_path_buf(),
                    source: zip::result::ZipError::Io(e),
                })
            }
        };
        writer
            .write_all(&buf[..n])
            .map_err(|e| Error::io("write", out_path, e))?;
        total += n as u64;
    }
    Ok(total)
}

/// Extract an archive given as one or more part files.
///
/// A single part is extracted directly. Several parts are concatenated in the given
/// order into `<first part>.tmp`, that file is extracted, and it is removed again
/// whether or not extraction succeeded.
pub fn extract_multiple<P: AsRef<Path>>(parts: &[P], output_dir: impl AsRef<Path>) -> Result<()> {
    let output_dir = output_dir.as_ref();
    let (first, _) = parts.split_first().ok_or_else(|| {
        Error::io(
            "extract",
            output_dir,
            io::Error::new(io::ErrorKind::InvalidInput, "no archive parts given"),
        )
    })?;
    let first = first.as_ref();

    if parts.len() == 1 {
        return extract_single(first, output_dir);
    }

    let interim = RemoveOnDrop::new(storage::temp_path(first));
    concatenate(parts, interim.path())?;
    extract_single(interim.path(), output_dir)
}

/// Writes the raw bytes of `parts`, in order, into a new file at `dest`.
fn concatenate<P: AsRef<Path>>(parts: &[P], dest: &Path) -> Result<u64> {
    let mut writer = storage::create_file(dest)?;
    let mut total = 0u64;
    for part in parts {
        let part = part.as_ref();
        let mut reader = File::open(part).map_err(|e| Error::io("open", part, e))?;
        total +=
            io::copy(&mut reader, &mut writer).map_err(|e| Error::io("concatenate", part, e))?;
    }
    writer.sync_all().map_err(|e| Error::io("sync", dest, e))?;
    tracing::debug!(
        parts = parts.len(),
        bytes = total,
        dest = %dest.display(),
        "concatenated parts"
    );
    Ok(total)
}

#[cfg(test)]
mod tests;
