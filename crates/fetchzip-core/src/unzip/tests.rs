//! Tests for single and multi-part zip extraction.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::FileOptions;
use zip::CompressionMethod;

use super::{extract_multiple, extract_single};
use crate::error::ErrorKind;

/// Builds a zip at `path` with the given directories and (name, bytes) files, in that order.
fn write_zip(path: &Path, dirs: &[&str], files: &[(&str, &[u8])]) {
    let file = fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    for d in dirs {
        writer.add_directory(*d, options).unwrap();
    }
    for (name, content) in files {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap();
}

/// Poorly compressible bytes so split points land inside entry data.
fn noise(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x2545_f491;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 16) as u8
        })
        .collect()
}

fn sample_tree() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("readme.txt", b"hello zip\n".to_vec()),
        ("docs/guide.md", b"# Guide\n\nsteps".to_vec()),
        ("docs/img/logo.bin", noise(10_000)),
        ("empty.dat", Vec::new()),
    ]
}

fn write_sample_zip(path: &Path) {
    let tree = sample_tree();
    let files: Vec<(&str, &[u8])> = tree.iter().map(|(n, c)| (*n, c.as_slice())).collect();
    write_zip(path, &["docs/", "docs/img/"], &files);
}

fn assert_tree(out: &Path) {
    for (name, content) in sample_tree() {
        let p = out.join(name);
        assert!(p.is_file(), "missing {}", p.display());
        assert_eq!(fs::read(&p).unwrap(), content, "content of {}", name);
    }
    assert!(out.join("docs/img").is_dir());
}

/// Splits the file at `path` into `k` byte ranges and returns the part paths.
fn split_file(path: &Path, k: usize) -> Vec<PathBuf> {
    let bytes = fs::read(path).unwrap();
    let chunk = bytes.len().div_ceil(k);
    bytes
        .chunks(chunk)
        .enumerate()
        .map(|(i, c)| {
            let p = path.with_extension(format!("z{:02}", i + 1));
            fs::write(&p, c).unwrap();
            p
        })
        .collect()
}

#[test]
fn extract_single_reproduces_tree() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("sample.zip");
    write_sample_zip(&archive);

    let out = dir.path().join("out");
    extract_single(&archive, &out).unwrap();
    assert_tree(&out);
}

#[test]
fn extract_single_creates_missing_parents() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("nodirs.zip");
    write_zip(&archive, &[], &[("a/b/c.txt", b"deep")]);

    let out = dir.path().join("out");
    extract_single(&archive, &out).unwrap();
    assert_eq!(fs::read(out.join("a/b/c.txt")).unwrap(), b"deep");
}

#[cfg(unix)]
#[test]
fn extract_single_applies_directory_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("modes.zip");
    let file = fs::File::create(&archive).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    writer
        .add_directory("private/", FileOptions::default().unix_permissions(0o700))
        .unwrap();
    writer.finish().unwrap();

    let out = dir.path().join("out");
    extract_single(&archive, &out).unwrap();
    let mode = fs::metadata(out.join("private")).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o700);
}

#[test]
fn extract_single_overwrites_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("one.zip");
    write_zip(&archive, &[], &[("file.txt", b"new")]);

    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("file.txt"), b"previous, longer content").unwrap();
    extract_single(&archive, &out).unwrap();
    assert_eq!(fs::read(out.join("file.txt")).unwrap(), b"new");
}

#[test]
fn extract_single_not_a_zip_is_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("bogus.zip");
    fs::write(&archive, b"this is not a zip archive at all").unwrap();

    let err = extract_single(&archive, dir.path().join("out")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn extract_single_missing_archive_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = extract_single(dir.path().join("absent.zip"), dir.path().join("out")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn extract_single_corrupted_entry_is_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("scrambled.zip");
    write_zip(&archive, &[], &[("n.bin", &noise(50_000))]);

    // The only entry's compressed data starts right after its 35-byte local header.
    let mut bytes = fs::read(&archive).unwrap();
    bytes[40..2000].fill(0xff);
    fs::write(&archive, &bytes).unwrap();

    let err = extract_single(&archive, dir.path().join("out")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format, "{}", err);
}

#[test]
fn extract_single_rejects_escaping_entries() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("slip.zip");
    write_zip(&archive, &[], &[("../evil.txt", b"x")]);

    let out = dir.path().join("out");
    let err = extract_single(&archive, &out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(!dir.path().join("evil.txt").exists());
}

#[test]
fn extract_multiple_single_part_delegates() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("sample.zip");
    write_sample_zip(&archive);

    let out = dir.path().join("out");
    extract_multiple(&[&archive], &out).unwrap();
    assert_tree(&out);
    assert!(!dir.path().join("sample.zip.tmp").exists());
}

#[test]
fn extract_multiple_matches_unsplit_archive() {
    for k in [2, 3, 7] {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("sample.zip");
        write_sample_zip(&archive);
        let parts = split_file(&archive, k);
        assert!(parts.len() >= 2);

        let whole = dir.path().join("whole");
        extract_single(&archive, &whole).unwrap();
        let joined = dir.path().join("joined");
        extract_multiple(&parts, &joined).unwrap();

        assert_tree(&whole);
        assert_tree(&joined);

        let mut tmp = parts[0].clone().into_os_string();
        tmp.push(".tmp");
        assert!(!PathBuf::from(tmp).exists(), "temp file left behind for k={}", k);
    }
}

#[test]
fn extract_multiple_removes_temp_file_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("broken.001");
    let second = dir.path().join("broken.002");
    fs::write(&first, b"not a").unwrap();
    fs::write(&second, b" zip archive, padded out well past the footer size").unwrap();

    let err = extract_multiple(&[&first, &second], dir.path().join("out")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(!dir.path().join("broken.001.tmp").exists());
}

#[test]
fn extract_multiple_wrong_order_fails() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("sample.zip");
    write_sample_zip(&archive);
    let mut parts = split_file(&archive, 2);
    parts.reverse();

    assert!(extract_multiple(&parts, dir.path().join("out")).is_err());
}

#[test]
fn extract_multiple_missing_part_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("sample.zip");
    write_sample_zip(&archive);
    let first = split_file(&archive, 2).remove(0);

    let parts = [first.clone(), dir.path().join("gone.z02")];
    let err = extract_multiple(&parts, dir.path().join("out")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    let mut tmp = first.into_os_string();
    tmp.push(".tmp");
    assert!(!PathBuf::from(tmp).exists());
}

#[test]
fn extract_multiple_no_parts_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let parts: [&Path; 0] = [];
    let err = extract_multiple(&parts, dir.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}
