//! Error conversion utilities for CLI.
//!
//! Converts arcsift-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use arcsift_core::ArchiveError;
use arcsift_core::error::PathIssue;
use std::path::Path;

/// Converts `ArchiveError` to user-friendly anyhow error with context
pub fn convert_archive_error(err: ArchiveError, archive: &Path) -> anyhow::Error {
    match err {
        ArchiveError::NotFound { path } => {
            anyhow!(
                "Archive not found: {}\n\
                 HINT: Check the path; it must point to an existing file.",
                path.display()
            )
        }
        ArchiveError::UnsupportedFormat { path } => {
            anyhow!(
                "Archive format not recognized: {}\n\
                 HINT: Supported formats: zip, rar, 7z, gzip",
                path.display()
            )
        }
        ArchiveError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The archive may be corrupted, truncated or encrypted.",
                archive.display(),
                reason
            )
        }
        ArchiveError::InvalidPattern { pattern, reason } => {
            anyhow!(
                "Invalid search pattern '{pattern}': {reason}\n\
                 HINT: Values given to --search and --files are regular expressions; escape characters such as '.', '[' or '(' with a backslash."
            )
        }
        ArchiveError::EmptyFilterResult { criteria } => {
            anyhow!(
                "No entries in '{}' match {}\n\
                 HINT: Run 'arcsift view' with the same filters to inspect the selection.",
                archive.display(),
                criteria
            )
        }
        ArchiveError::InvalidDestination { path, issue } => {
            let hint = match &issue {
                PathIssue::Malformed => "Remove the doubled backslash from --path.",
                PathIssue::ContinuityCheckFailed { .. } => {
                    "The destination is outside the expected location; adjust --path or --check."
                }
                PathIssue::NoExistingAncestor => {
                    "Create a parent directory first; arcsift only builds onto existing folders."
                }
                PathIssue::NotADirectory => "Choose a destination that is not an existing file.",
            };
            anyhow!(
                "Refusing destination '{}': {}\n\
                 HINT: {}",
                path.display(),
                issue,
                hint
            )
        }
        ArchiveError::PartialExtraction {
            completed,
            member,
            source,
        } => {
            anyhow!(
                "Extraction of '{}' stopped at '{}': {}\n\
                 {} entries were already written and have been left in place.\n\
                 HINT: Re-run without --files-only to extract with the archive's layout.",
                archive.display(),
                member,
                source,
                completed
            )
        }
        ArchiveError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
    }
}

/// Adds context to a generic error about archive operations
pub fn add_archive_context<T>(
    result: Result<T, ArchiveError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, archive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcsift_core::FilterCriteria;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_empty_filter_result() {
        let err = ArchiveError::EmptyFilterResult {
            criteria: FilterCriteria::default().with_types(vec![".zip".into()]),
        };
        let converted = convert_archive_error(err, Path::new("photos.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("photos.zip"));
        assert!(msg.contains(".zip"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_invalid_pattern_mentions_both_flags() {
        let err = ArchiveError::InvalidPattern {
            pattern: "report[1".into(),
            reason: "unclosed character class".into(),
        };
        let converted = convert_archive_error(err, Path::new("a.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("report[1"));
        assert!(msg.contains("--files"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_continuity_error() {
        let err = ArchiveError::InvalidDestination {
            path: PathBuf::from("/tmp/out"),
            issue: PathIssue::ContinuityCheckFailed {
                expected: "safe".into(),
            },
        };
        let converted = convert_archive_error(err, Path::new("a.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("continuity check failed"));
        assert!(msg.contains("--check"));
    }

    #[test]
    fn test_convert_partial_extraction() {
        let err = ArchiveError::PartialExtraction {
            completed: 3,
            member: "docs/broken.txt".into(),
            source: Box::new(ArchiveError::InvalidArchive("crc mismatch".into())),
        };
        let converted = convert_archive_error(err, Path::new("a.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("docs/broken.txt"));
        assert!(msg.contains("3 entries"));
    }

    #[test]
    fn test_convert_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let converted = convert_archive_error(ArchiveError::Io(io_err), Path::new("a.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("I/O error"));
    }
}
