//! Test utilities for building sample archives.
//!
//! Archives are built in memory (or staged on disk for 7z) and written into
//! a caller-provided directory so tests never depend on checked-in fixtures.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use flate2::Compression;
use flate2::write::GzEncoder;

/// Creates an in-memory ZIP archive from a list of entries.
///
/// Each entry is a tuple of (path, content). Paths ending in `/` become
/// directory entries and their content is ignored. Files are stored
/// uncompressed with mode 0o644.
///
/// # Examples
///
/// ```
/// use arcsift_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(&[("dir/", b""), ("dir/nested.txt", b"world")]);
/// assert!(zip_data.starts_with(b"PK\x03\x04"));
/// ```
#[must_use]
pub fn create_test_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    use zip::write::SimpleFileOptions;
    use zip::write::ZipWriter;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored)
        .unix_permissions(0o644);

    for (path, data) in entries {
        if path.ends_with('/') {
            zip.add_directory(*path, options).unwrap();
        } else {
            zip.start_file(*path, options).unwrap();
            zip.write_all(data).unwrap();
        }
    }

    zip.finish().unwrap().into_inner()
}

/// Creates an in-memory gzip stream wrapping `data`.
///
/// # Examples
///
/// ```
/// use arcsift_core::test_utils::create_test_gzip;
///
/// let gz = create_test_gzip(b"hello");
/// assert_eq!(&gz[..2], &[0x1f, 0x8b]);
/// ```
#[must_use]
pub fn create_test_gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Writes a ZIP archive named `name` into `dir` and returns its path.
pub fn write_test_zip(dir: &Path, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, create_test_zip(entries)).unwrap();
    path
}

/// Writes a gzip file named `name` into `dir` and returns its path.
pub fn write_test_gzip(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, create_test_gzip(data)).unwrap();
    path
}

/// Writes a 7z archive named `name` into `dir` and returns its path.
///
/// The entries are staged as real files next to the archive and compressed
/// with `sevenz-rust2`, so directories are stored with their directory flag
/// and no trailing separator. Paths ending in `/` become empty directories.
pub fn write_test_7z(dir: &Path, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
    let staging = dir.join(format!(".{name}.staging"));
    std::fs::create_dir_all(&staging).unwrap();

    for (entry, data) in entries {
        let target = staging.join(entry.trim_end_matches('/'));
        if entry.ends_with('/') {
            std::fs::create_dir_all(&target).unwrap();
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(&target, data).unwrap();
        }
    }

    let path = dir.join(name);
    sevenz_rust2::compress_to_path(&staging, &path).unwrap();
    std::fs::remove_dir_all(&staging).unwrap();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_create_test_zip() {
        let zip_data = create_test_zip(&[("file.txt", b"hello"), ("dir/", b"")]);
        let mut archive = zip::ZipArchive::new(Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut content = String::new();
        archive
            .by_name("file.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "hello");
        assert!(archive.by_name("dir/").unwrap().is_dir());
    }

    #[test]
    fn test_write_test_7z() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = write_test_7z(temp.path(), "sample.7z", &[("dir/file.txt", b"seven")]);

        let header = std::fs::read(&path).unwrap();
        assert!(header.starts_with(&[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C]));
        assert!(!temp.path().join(".sample.7z.staging").exists());
    }

    #[test]
    fn test_create_test_gzip() {
        let gz = create_test_gzip(b"payload");
        let mut decoder = flate2::read::GzDecoder::new(gz.as_slice());
        let mut out = Vec::new();
        decoder.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"payload");
    }
}
