//! Destination resolution and validation.
//!
//! Every check here runs before the first byte is written:
//!
//! 1. The requested path must not contain a literal `\\`.
//! 2. The resolved path must contain the continuity check substring, if any.
//! 3. The destination, or an ancestor below the filesystem root, must already
//!    exist as a directory. This stops a typo from silently creating a deep
//!    tree somewhere unexpected.
//! 4. Nothing other than a directory may already exist at the destination.

use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveError;
use crate::ArchiveFile;
use crate::Result;
use crate::config::Destination;
use crate::error::PathIssue;
use crate::paths;

/// Suffix appended when the derived folder name would equal the archive's
/// own file name (archives without an extension).
const FOLDER_COLLISION_SUFFIX: &str = "_contents";

/// Derives the sibling folder name for an archive.
fn sibling_folder_name(archive: &ArchiveFile) -> String {
    let name = paths::strip_extensions(archive.full_name(), archive.format().folder_suffixes());
    if name == archive.full_name() {
        format!("{name}{FOLDER_COLLISION_SUFFIX}")
    } else {
        name
    }
}

/// Resolves a destination into an absolute directory path.
///
/// # Errors
///
/// Returns an error if a relative path cannot be made absolute.
pub fn resolve_destination(archive: &ArchiveFile, destination: &Destination) -> Result<PathBuf> {
    let resolved = match destination {
        Destination::SiblingFolder => archive.directory().join(sibling_folder_name(archive)),
        Destination::ArchiveDirectory => archive.directory().to_path_buf(),
        Destination::Path(path) => paths::absolute(path)?,
    };
    tracing::debug!(?destination, resolved = %resolved.display(), "resolved destination");
    Ok(resolved)
}

/// Returns `true` if `path` or one of its ancestors below the root exists.
fn has_existing_ancestor(path: &Path) -> bool {
    if path.is_dir() {
        return true;
    }
    path.ancestors()
        .skip(1)
        .filter(|ancestor| ancestor.parent().is_some() && !ancestor.as_os_str().is_empty())
        .any(Path::is_dir)
}

/// Validates a resolved destination against the safety rules.
///
/// # Errors
///
/// Returns [`ArchiveError::InvalidDestination`] naming the failed rule.
pub fn validate_destination(
    destination: &Destination,
    resolved: &Path,
    continuity_check: Option<&str>,
) -> Result<()> {
    let refuse = |issue| ArchiveError::InvalidDestination {
        path: resolved.to_path_buf(),
        issue,
    };

    if let Destination::Path(requested) = destination
        && requested.to_string_lossy().contains("\\\\")
    {
        return Err(ArchiveError::InvalidDestination {
            path: requested.clone(),
            issue: PathIssue::Malformed,
        });
    }

    if let Some(expected) = continuity_check
        && !resolved.to_string_lossy().contains(expected)
    {
        return Err(refuse(PathIssue::ContinuityCheckFailed {
            expected: expected.to_string(),
        }));
    }

    if resolved.exists() && !resolved.is_dir() {
        return Err(refuse(PathIssue::NotADirectory));
    }

    if !has_existing_ancestor(resolved) {
        return Err(refuse(PathIssue::NoExistingAncestor));
    }

    Ok(())
}

/// Creates the destination directory and any missing parents.
///
/// Idempotent: an existing directory is accepted as-is.
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub fn prepare_destination(resolved: &Path) -> Result<()> {
    std::fs::create_dir_all(resolved)?;
    Ok(())
}

/// Resolves and validates the destination without touching the filesystem.
///
/// # Errors
///
/// Returns the first failing rule, or an I/O error from path resolution.
pub fn plan_destination(
    archive: &ArchiveFile,
    destination: &Destination,
    continuity_check: Option<&str>,
) -> Result<PathBuf> {
    let resolved = resolve_destination(archive, destination)?;
    validate_destination(destination, &resolved, continuity_check)?;
    Ok(resolved)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::write_test_gzip;
    use crate::test_utils::write_test_zip;
    use tempfile::TempDir;

    #[test]
    fn test_sibling_folder_zip() {
        let temp = TempDir::new().unwrap();
        let path = write_test_zip(temp.path(), "report.zip", &[("a.txt", b"a")]);
        let archive = ArchiveFile::open(&path).unwrap();

        let resolved = resolve_destination(&archive, &Destination::SiblingFolder).unwrap();
        assert_eq!(resolved, archive.directory().join("report"));
    }

    #[test]
    fn test_sibling_folder_gzip_strips_twice() {
        let temp = TempDir::new().unwrap();
        let path = write_test_gzip(temp.path(), "payload.tar.gz", b"data");
        let archive = ArchiveFile::open(&path).unwrap();

        let resolved = resolve_destination(&archive, &Destination::SiblingFolder).unwrap();
        assert_eq!(resolved, archive.directory().join("payload"));
    }

    #[test]
    fn test_sibling_folder_without_extension() {
        let temp = TempDir::new().unwrap();
        let path = write_test_zip(temp.path(), "bundle", &[("a.txt", b"a")]);
        let archive = ArchiveFile::open(&path).unwrap();

        let resolved = resolve_destination(&archive, &Destination::SiblingFolder).unwrap();
        assert_eq!(resolved, archive.directory().join("bundle_contents"));
    }

    #[test]
    fn test_archive_directory() {
        let temp = TempDir::new().unwrap();
        let path = write_test_zip(temp.path(), "report.zip", &[("a.txt", b"a")]);
        let archive = ArchiveFile::open(&path).unwrap();

        let resolved = resolve_destination(&archive, &Destination::ArchiveDirectory).unwrap();
        assert_eq!(resolved, archive.directory());
    }

    #[test]
    fn test_explicit_path_is_absolute() {
        let temp = TempDir::new().unwrap();
        let path = write_test_zip(temp.path(), "report.zip", &[("a.txt", b"a")]);
        let archive = ArchiveFile::open(&path).unwrap();

        let resolved =
            resolve_destination(&archive, &Destination::Path(PathBuf::from("rel/out"))).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("rel/out"));
    }

    #[test]
    fn test_malformed_path_rejected() {
        let destination = Destination::Path(PathBuf::from("C:\\\\out"));
        let result = validate_destination(&destination, Path::new("/tmp/out"), None);
        assert!(matches!(
            result,
            Err(ArchiveError::InvalidDestination {
                issue: PathIssue::Malformed,
                ..
            })
        ));
    }

    #[test]
    fn test_continuity_check() {
        let temp = TempDir::new().unwrap();
        let resolved = temp.path().join("safe/out/report");
        std::fs::create_dir_all(temp.path().join("safe")).unwrap();
        let destination = Destination::Path(resolved.clone());

        assert!(validate_destination(&destination, &resolved, Some("safe")).is_ok());

        let result = validate_destination(&destination, &resolved, Some("other"));
        assert!(matches!(
            result,
            Err(ArchiveError::InvalidDestination {
                issue: PathIssue::ContinuityCheckFailed { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_no_existing_ancestor() {
        let destination = Destination::Path(PathBuf::from("/arcsift-missing-root/a/b"));
        let result =
            validate_destination(&destination, Path::new("/arcsift-missing-root/a/b"), None);
        assert!(matches!(
            result,
            Err(ArchiveError::InvalidDestination {
                issue: PathIssue::NoExistingAncestor,
                ..
            })
        ));
    }

    #[test]
    fn test_deep_path_under_existing_ancestor() {
        let temp = TempDir::new().unwrap();
        let resolved = temp.path().join("x/y/z");
        let destination = Destination::Path(resolved.clone());

        validate_destination(&destination, &resolved, None).unwrap();
        prepare_destination(&resolved).unwrap();
        prepare_destination(&resolved).unwrap();
        assert!(resolved.is_dir());
    }

    #[test]
    fn test_existing_file_rejected() {
        let temp = TempDir::new().unwrap();
        let resolved = temp.path().join("taken");
        std::fs::write(&resolved, "file").unwrap();
        let destination = Destination::Path(resolved.clone());

        let result = validate_destination(&destination, &resolved, None);
        assert!(matches!(
            result,
            Err(ArchiveError::InvalidDestination {
                issue: PathIssue::NotADirectory,
                ..
            })
        ));
    }
}
