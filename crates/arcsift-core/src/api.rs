//! High-level public API for listing, extracting and moving archives.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveError;
use crate::ArchiveFile;
use crate::ExtractionReport;
use crate::Result;
use crate::config::Destination;
use crate::config::ExtractionRequest;
use crate::filter::FilterCriteria;
use crate::paths;
use crate::planner;
use crate::report::NoopProgress;
use crate::report::ProgressCallback;

/// Lists the entries of an archive selected by `criteria`.
///
/// # Errors
///
/// Returns an error if the archive does not exist, has an unsupported
/// format, cannot be read, or a pattern is invalid.
///
/// # Examples
///
/// ```no_run
/// use arcsift_core::FilterCriteria;
/// use arcsift_core::list_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let criteria = FilterCriteria::default().with_patterns(vec!["^docs/".into()]);
/// for entry in list_archive("bundle.zip", &criteria)? {
///     println!("{entry}");
/// }
/// # Ok(())
/// # }
/// ```
pub fn list_archive<P: AsRef<Path>>(archive_path: P, criteria: &FilterCriteria) -> Result<Vec<String>> {
    let mut archive = ArchiveFile::open(archive_path)?;
    Ok(archive.read_contents(criteria)?.to_vec())
}

/// Extracts an archive as described by `request`.
///
/// The archive format is detected from its signature.
///
/// # Errors
///
/// Returns an error if:
/// - The archive does not exist or its format is unsupported
/// - The destination is refused
/// - No entry matches the filter criteria
/// - I/O operations fail
///
/// # Examples
///
/// ```no_run
/// use arcsift_core::Destination;
/// use arcsift_core::ExtractionRequest;
/// use arcsift_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let request = ExtractionRequest::new()
///     .with_destination(Destination::SiblingFolder)
///     .with_files_only(true);
/// let report = extract_archive("bundle.zip", &request)?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>>(
    archive_path: P,
    request: &ExtractionRequest,
) -> Result<ExtractionReport> {
    extract_archive_with_progress(archive_path, request, &mut NoopProgress)
}

/// Extracts an archive, reporting per-entry progress.
///
/// When `request.delete_source` is set the archive is removed after a
/// successful extraction. A failed removal is reported as a warning.
///
/// # Errors
///
/// See [`extract_archive`].
pub fn extract_archive_with_progress<P: AsRef<Path>>(
    archive_path: P,
    request: &ExtractionRequest,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let mut archive = ArchiveFile::open(archive_path)?;
    let mut report = archive.extract_with_progress(request, progress)?;

    if request.delete_source {
        match fs::remove_file(archive.full_path()) {
            Ok(()) => {
                report.source_deleted = true;
                tracing::info!(archive = %archive.full_path().display(), "deleted source archive");
            }
            Err(e) => {
                tracing::warn!(archive = %archive.full_path().display(), error = %e, "failed to delete source archive");
                report.add_warning(format!(
                    "could not delete {}: {e}",
                    archive.full_path().display()
                ));
            }
        }
    }

    Ok(report)
}

/// Moves an archive file into `target_dir` and returns its new path.
///
/// The target directory follows the same rules as an extraction
/// destination: it, or an ancestor below the root, must already exist. It
/// is created if missing. Renames that cross filesystems fall back to copy
/// and remove.
///
/// # Errors
///
/// Returns an error if the archive does not exist, the target directory is
/// refused, or the move fails.
pub fn move_archive<P: AsRef<Path>, Q: AsRef<Path>>(archive_path: P, target_dir: Q) -> Result<PathBuf> {
    let source = archive_path.as_ref();
    if !paths::is_file(source) {
        return Err(ArchiveError::NotFound {
            path: source.to_path_buf(),
        });
    }
    let source = paths::absolute(source)?;

    let destination = Destination::Path(target_dir.as_ref().to_path_buf());
    let target_dir = paths::absolute(target_dir.as_ref())?;
    planner::validate_destination(&destination, &target_dir, None)?;
    planner::prepare_destination(&target_dir)?;

    let target = target_dir.join(paths::file_name(&source, true));
    if target == source {
        return Ok(target);
    }

    if let Err(e) = fs::rename(&source, &target) {
        tracing::debug!(error = %e, "rename failed, copying instead");
        fs::copy(&source, &target)?;
        fs::remove_file(&source)?;
    }

    tracing::info!(from = %source.display(), to = %target.display(), "moved archive");
    Ok(target)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PathIssue;
    use crate::test_utils::write_test_zip;
    use tempfile::TempDir;

    #[test]
    fn test_list_archive_filters() {
        let temp = TempDir::new().unwrap();
        let path = write_test_zip(
            temp.path(),
            "bundle.zip",
            &[("a.txt", b"a"), ("b.log", b"b"), ("ab.txt", b"ab")],
        );

        let criteria = FilterCriteria::default()
            .with_patterns(vec!["a".into(), "b".into()])
            .with_exclusive(true);
        assert_eq!(list_archive(&path, &criteria).unwrap(), vec!["ab.txt"]);
    }

    #[test]
    fn test_list_archive_missing() {
        let result = list_archive("/nonexistent/bundle.zip", &FilterCriteria::default());
        assert!(matches!(result, Err(ArchiveError::NotFound { .. })));
    }

    #[test]
    fn test_extract_archive_delete_source() {
        let temp = TempDir::new().unwrap();
        let path = write_test_zip(temp.path(), "bundle.zip", &[("a.txt", b"a")]);
        let request = ExtractionRequest::new()
            .with_destination(Destination::SiblingFolder)
            .with_delete_source(true);

        let report = extract_archive(&path, &request).unwrap();

        assert!(report.source_deleted);
        assert!(!path.exists());
        assert!(report.destination.join("a.txt").is_file());
    }

    #[test]
    fn test_extract_archive_keeps_source_on_failure() {
        let temp = TempDir::new().unwrap();
        let path = write_test_zip(temp.path(), "bundle.zip", &[("a.txt", b"a")]);
        let request = ExtractionRequest::new()
            .with_criteria(FilterCriteria::default().with_files(vec!["missing".into()]))
            .with_delete_source(true);

        let result = extract_archive(&path, &request);

        assert!(matches!(result, Err(ArchiveError::EmptyFilterResult { .. })));
        assert!(path.exists());
    }

    #[test]
    fn test_move_archive() {
        let temp = TempDir::new().unwrap();
        let path = write_test_zip(temp.path(), "bundle.zip", &[("a.txt", b"a")]);
        let target_dir = temp.path().join("archived/2024");

        let moved = move_archive(&path, &target_dir).unwrap();

        assert_eq!(moved, paths::absolute(&target_dir).unwrap().join("bundle.zip"));
        assert!(moved.is_file());
        assert!(!path.exists());
    }

    #[test]
    fn test_move_archive_into_own_directory() {
        let temp = TempDir::new().unwrap();
        let path = write_test_zip(temp.path(), "bundle.zip", &[("a.txt", b"a")]);

        let moved = move_archive(&path, temp.path()).unwrap();
        assert!(moved.is_file());
    }

    #[test]
    fn test_move_archive_refuses_missing_ancestors() {
        let temp = TempDir::new().unwrap();
        let path = write_test_zip(temp.path(), "bundle.zip", &[("a.txt", b"a")]);

        let result = move_archive(&path, "/arcsift-missing-root/archives");
        assert!(matches!(
            result,
            Err(ArchiveError::InvalidDestination {
                issue: PathIssue::NoExistingAncestor,
                ..
            })
        ));
        assert!(path.exists());
    }
}
