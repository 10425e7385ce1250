//! Path string helpers shared by every stage of the pipeline.
//!
//! All helpers operate on the absolute form of the path so that relative
//! inputs produce the same names as their absolute equivalents.

use std::path::Path;
use std::path::PathBuf;

/// Returns the absolute form of `path` without touching the filesystem.
///
/// Relative paths are joined to the current working directory. Symlinks and
/// `..` components are left as-is.
pub fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    std::path::absolute(path)
}

/// Returns the file name of `path`, with or without its final extension.
///
/// # Examples
///
/// ```
/// use arcsift_core::paths::file_name;
/// use std::path::Path;
///
/// assert_eq!(file_name(Path::new("/dir/report.zip"), true), "report.zip");
/// assert_eq!(file_name(Path::new("/dir/report.zip"), false), "report");
/// assert_eq!(file_name(Path::new("/dir/payload.tar.gz"), false), "payload.tar");
/// ```
#[must_use]
pub fn file_name(path: &Path, with_extension: bool) -> String {
    let name = if with_extension {
        path.file_name()
    } else {
        path.file_stem()
    };
    name.map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Returns the final extension of `path` including the leading `.`.
///
/// Returns an empty string when there is no extension.
///
/// # Examples
///
/// ```
/// use arcsift_core::paths::extension;
/// use std::path::Path;
///
/// assert_eq!(extension(Path::new("a/b.TXT")), ".TXT");
/// assert_eq!(extension(Path::new("payload.tar.gz")), ".gz");
/// assert_eq!(extension(Path::new("Makefile")), "");
/// ```
#[must_use]
pub fn extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

/// Returns the parent directory of `path`.
///
/// The filesystem root is its own parent.
#[must_use]
pub fn parent_directory(path: &Path) -> PathBuf {
    path.parent().map_or_else(|| path.to_path_buf(), Path::to_path_buf)
}

/// Strips the final extension from a file name `times` times.
///
/// ```
/// use arcsift_core::paths::strip_extensions;
///
/// assert_eq!(strip_extensions("payload.tar.gz", 2), "payload");
/// assert_eq!(strip_extensions("report.zip", 1), "report");
/// assert_eq!(strip_extensions("README", 2), "README");
/// ```
#[must_use]
pub fn strip_extensions(name: &str, times: usize) -> String {
    let mut current = name.to_string();
    for _ in 0..times {
        let stem = file_name(Path::new(&current), false);
        if stem.is_empty() || stem == current {
            break;
        }
        current = stem;
    }
    current
}

/// Returns `true` if `path` exists and is a regular file.
#[must_use]
pub fn is_file(path: &Path) -> bool {
    path.is_file()
}

/// Returns `true` if `path` exists and is a directory.
#[must_use]
pub fn is_directory(path: &Path) -> bool {
    path.is_dir()
}

/// Returns `true` if an archive entry name denotes a directory placeholder.
#[must_use]
pub fn is_directory_entry(entry: &str) -> bool {
    entry.ends_with('/') || entry.ends_with('\\')
}
