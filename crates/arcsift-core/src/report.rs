//! Extraction operation reporting.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::formats::ArchiveFormat;

/// Report of an archive extraction operation.
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    /// Absolute destination directory.
    pub destination: PathBuf,

    /// Container format of the source archive.
    pub format: ArchiveFormat,

    /// Entries selected by the filter, in archive order.
    pub entries: Vec<String>,

    /// Number of files written to disk.
    pub files_extracted: usize,

    /// Number of files moved up to the destination root (files-only mode).
    pub files_flattened: usize,

    /// Number of empty directories removed after flattening.
    pub directories_pruned: usize,

    /// Whether the source archive was deleted afterwards.
    pub source_deleted: bool,

    /// Duration of the extraction operation.
    pub duration: Duration,

    /// Warnings generated during extraction.
    pub warnings: Vec<String>,
}

impl ExtractionReport {
    /// Creates an empty report for the given destination.
    #[must_use]
    pub fn new(destination: PathBuf, format: ArchiveFormat) -> Self {
        Self {
            destination,
            format,
            entries: Vec::new(),
            files_extracted: 0,
            files_flattened: 0,
            directories_pruned: 0,
            source_deleted: false,
            duration: Duration::ZERO,
            warnings: Vec::new(),
        }
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Callback trait for progress reporting during extraction.
///
/// # Examples
///
/// ```
/// use arcsift_core::ProgressCallback;
/// use std::path::Path;
///
/// struct SimpleProgress;
///
/// impl ProgressCallback for SimpleProgress {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("Processing {}/{}: {}", current, total, path.display());
///     }
///
///     fn on_entry_complete(&mut self, path: &Path) {
///         println!("Completed: {}", path.display());
///     }
///
///     fn on_complete(&mut self) {
///         println!("Operation complete");
///     }
/// }
/// ```
pub trait ProgressCallback {
    /// Called when starting to process an entry.
    ///
    /// # Arguments
    ///
    /// * `path` - Entry path inside the archive
    /// * `total` - Number of selected entries
    /// * `current` - Current entry number (1-indexed)
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called when an entry has been completely processed.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called when the entire operation is complete.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}
