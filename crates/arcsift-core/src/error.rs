//! Error types for archive inspection and extraction.

use std::path::PathBuf;
use thiserror::Error;

use crate::filter::FilterCriteria;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Reason a destination directory was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathIssue {
    /// The requested path contains a literal double backslash.
    Malformed,
    /// The resolved path does not contain the required substring.
    ContinuityCheckFailed {
        /// The substring that was expected in the resolved path.
        expected: String,
    },
    /// Neither the destination nor any of its ancestors exist.
    NoExistingAncestor,
    /// Something other than a directory already exists at the destination.
    NotADirectory,
}

impl std::fmt::Display for PathIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed path (contains '\\\\')"),
            Self::ContinuityCheckFailed { expected } => {
                write!(f, "continuity check failed (expected '{expected}' in path)")
            }
            Self::NoExistingAncestor => write!(f, "no existing ancestor directory"),
            Self::NotADirectory => write!(f, "path exists and is not a directory"),
        }
    }
}

/// Errors that can occur while probing, listing or extracting archives.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The archive path does not reference an existing file.
    #[error("archive not found: {path}")]
    NotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// No supported container signature was recognized.
    #[error("unsupported archive format: {path}")]
    UnsupportedFormat {
        /// The file that failed classification.
        path: PathBuf,
    },

    /// The decoder rejected the archive contents.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// A search pattern is not a valid regular expression.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Compiler message.
        reason: String,
    },

    /// Filtering left nothing to extract.
    #[error("no entries match {criteria}")]
    EmptyFilterResult {
        /// The criteria that produced the empty selection.
        criteria: FilterCriteria,
    },

    /// The destination directory was refused.
    #[error("invalid destination {path}: {issue}")]
    InvalidDestination {
        /// The destination as requested or resolved.
        path: PathBuf,
        /// Why it was refused.
        issue: PathIssue,
    },

    /// Files-only extraction stopped at a failing member.
    ///
    /// Members extracted before the failure are left on disk.
    #[error("extraction stopped at '{member}' after {completed} entries: {source}")]
    PartialExtraction {
        /// Number of members fully written before the failure.
        completed: usize,
        /// The member that failed.
        member: String,
        /// Underlying failure.
        #[source]
        source: Box<ArchiveError>,
    },
}

impl ArchiveError {
    /// Returns `true` if this error rejects the destination directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcsift_core::ArchiveError;
    /// use arcsift_core::error::PathIssue;
    /// use std::path::PathBuf;
    ///
    /// let err = ArchiveError::InvalidDestination {
    ///     path: PathBuf::from("/out"),
    ///     issue: PathIssue::NoExistingAncestor,
    /// };
    /// assert!(err.is_path_error());
    /// ```
    #[must_use]
    pub const fn is_path_error(&self) -> bool {
        matches!(self, Self::InvalidDestination { .. })
    }

    /// Returns `true` if the error is raised before anything is written.
    ///
    /// I/O failures and partial extractions may leave files behind;
    /// every other kind is detected up front.
    #[must_use]
    pub const fn is_fatal_before_write(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::PartialExtraction { .. })
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcsift_core::ArchiveError;
    ///
    /// let err = ArchiveError::InvalidArchive("bad header".to_string());
    /// assert_eq!(err.context(), Some("bad header"));
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) => Some(msg),
            Self::InvalidPattern { reason, .. } => Some(reason),
            Self::PartialExtraction { member, .. } => Some(member),
            _ => None,
        }
    }
}
