//! Extraction helpers shared between the format decoders.
//!
//! # Functions
//!
//! - [`write_file`]: buffered copy of a member stream to disk
//! - [`create_directory`]: directory creation (idempotent)
//! - [`enclosed_path`]: maps an entry name to a path that stays below the
//!   destination

use std::collections::HashSet;
use std::fs::File;
use std::fs::create_dir_all;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::Result;

/// Buffer size used for member writes.
const WRITE_BUFFER_SIZE: usize = 64 * 1024;

/// Writes a member stream to `output_path`, creating parent directories.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns an error if a directory or the file cannot be created, or if the
/// copy fails.
pub fn write_file<R: Read + ?Sized>(reader: &mut R, output_path: &Path) -> Result<u64> {
    if let Some(parent) = output_path.parent() {
        create_dir_all(parent)?;
    }

    let output_file = File::create(output_path)?;
    let mut buffered_writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, output_file);
    let bytes_written = std::io::copy(reader, &mut buffered_writer)?;
    buffered_writer.flush()?;

    Ok(bytes_written)
}

/// Creates a directory (and its parents).
///
/// Idempotent: an existing directory is not an error.
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub fn create_directory(path: &Path) -> Result<()> {
    create_dir_all(path)?;
    Ok(())
}

/// Converts an entry name into a relative path that cannot leave the
/// destination.
///
/// Returns `None` for names with parent references, absolute roots or drive
/// prefixes, and for names that reduce to nothing.
///
/// # Examples
///
/// ```
/// use arcsift_core::formats::common::enclosed_path;
/// use std::path::PathBuf;
///
/// assert_eq!(enclosed_path("a/./b.txt"), Some(PathBuf::from("a/b.txt")));
/// assert_eq!(enclosed_path("../etc/passwd"), None);
/// assert_eq!(enclosed_path("/etc/passwd"), None);
/// ```
#[must_use]
pub fn enclosed_path(name: &str) -> Option<PathBuf> {
    let normalized = name.replace('\\', "/");
    let mut relative = PathBuf::new();

    for component in Path::new(&normalized).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if relative.as_os_str().is_empty() {
        None
    } else {
        Some(relative)
    }
}

/// Builds a lookup set from a member list.
#[must_use]
pub fn member_set(members: &[String]) -> HashSet<&str> {
    members.iter().map(String::as_str).collect()
}
