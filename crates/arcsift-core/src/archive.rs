//! The archive handle.

use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveError;
use crate::ExtractionReport;
use crate::Result;
use crate::config::ExtractionRequest;
use crate::extraction;
use crate::filter::FilterCriteria;
use crate::filter::filter_entries;
use crate::formats::ArchiveFormat;
use crate::formats::detect::detect_format;
use crate::paths;
use crate::report::NoopProgress;
use crate::report::ProgressCallback;

/// One opened archive file.
///
/// The descriptive fields are fixed at construction. Only `entries`
/// changes: every listing, filtering or extraction call replaces it with
/// the entries that call worked on.
///
/// # Examples
///
/// ```no_run
/// use arcsift_core::ArchiveFile;
/// use arcsift_core::FilterCriteria;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut archive = ArchiveFile::open("downloads/report.zip")?;
/// let criteria = FilterCriteria::default().with_types(vec![".pdf".into()]);
/// for entry in archive.read_contents(&criteria)? {
///     println!("{entry}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveFile {
    full_path: PathBuf,
    directory: PathBuf,
    base_name: String,
    full_name: String,
    extension: String,
    format: ArchiveFormat,
    entries: Vec<String>,
}

impl ArchiveFile {
    /// Opens an archive and classifies its format.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::NotFound`] if `path` is not an existing file
    /// and [`ArchiveError::UnsupportedFormat`] if no signature matches.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !paths::is_file(path) {
            return Err(ArchiveError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let full_path = paths::absolute(path)?;
        let format = detect_format(&full_path)?;

        Ok(Self {
            directory: paths::parent_directory(&full_path),
            base_name: paths::file_name(&full_path, false),
            full_name: paths::file_name(&full_path, true),
            extension: paths::extension(&full_path),
            format,
            entries: Vec::new(),
            full_path,
        })
    }

    /// Returns the absolute path to the archive file.
    #[must_use]
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    /// Returns the directory containing the archive.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns the file name without its final extension.
    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Returns the file name including its extension.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the final extension including the leading `.`, or `""`.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Returns the detected container format.
    #[must_use]
    pub const fn format(&self) -> ArchiveFormat {
        self.format
    }

    /// Returns the entries produced by the most recent call.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Lists every entry in the archive.
    ///
    /// Always re-reads the archive.
    ///
    /// # Errors
    ///
    /// Returns an error if the decoder cannot read the archive.
    pub fn list(&mut self) -> Result<&[String]> {
        self.entries = self.format.decoder().list_members(&self.full_path)?;
        tracing::debug!(
            archive = %self.full_path.display(),
            format = %self.format,
            count = self.entries.len(),
            "listed archive"
        );
        Ok(&self.entries)
    }

    /// Lists the archive and keeps the entries selected by `criteria`.
    ///
    /// An empty selection is not an error here.
    ///
    /// # Errors
    ///
    /// Returns an error if listing fails or a pattern is invalid.
    pub fn read_contents(&mut self, criteria: &FilterCriteria) -> Result<&[String]> {
        let all = self.format.decoder().list_members(&self.full_path)?;
        self.entries = filter_entries(&all, criteria)?;
        Ok(&self.entries)
    }

    /// Extracts the entries selected by `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination is refused, nothing matches the
    /// filter, or writing fails.
    pub fn extract(&mut self, request: &ExtractionRequest) -> Result<ExtractionReport> {
        self.extract_with_progress(request, &mut NoopProgress)
    }

    /// Extracts the entries selected by `request`, reporting progress.
    ///
    /// # Errors
    ///
    /// See [`ArchiveFile::extract`].
    pub fn extract_with_progress(
        &mut self,
        request: &ExtractionRequest,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExtractionReport> {
        let report = extraction::run(self, request, progress)?;
        self.entries.clone_from(&report.entries);
        Ok(report)
    }
}
