//! Extraction request configuration.

use std::path::PathBuf;

use crate::filter::FilterCriteria;

/// Where extracted entries should land.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Destination {
    /// Next to the archive, in a folder named after it.
    ///
    /// `/dir/report.zip` extracts to `/dir/report`; gzip archives lose both
    /// suffixes, so `/dir/payload.tar.gz` extracts to `/dir/payload`.
    SiblingFolder,

    /// Directly into the directory that contains the archive.
    #[default]
    ArchiveDirectory,

    /// An explicit directory; relative paths are taken from the working
    /// directory.
    Path(PathBuf),
}

impl Destination {
    /// Maps an optional requested path string onto a destination.
    ///
    /// `None` extracts in place, an empty string selects the sibling folder,
    /// anything else is an explicit path.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcsift_core::Destination;
    /// use std::path::PathBuf;
    ///
    /// assert_eq!(Destination::from_requested(None), Destination::ArchiveDirectory);
    /// assert_eq!(Destination::from_requested(Some("")), Destination::SiblingFolder);
    /// assert_eq!(
    ///     Destination::from_requested(Some("out")),
    ///     Destination::Path(PathBuf::from("out"))
    /// );
    /// ```
    #[must_use]
    pub fn from_requested(requested: Option<&str>) -> Self {
        match requested {
            None => Self::ArchiveDirectory,
            Some("") => Self::SiblingFolder,
            Some(path) => Self::Path(PathBuf::from(path)),
        }
    }
}

/// Everything needed to run one extraction.
///
/// # Examples
///
/// ```
/// use arcsift_core::Destination;
/// use arcsift_core::ExtractionRequest;
/// use arcsift_core::FilterCriteria;
///
/// let request = ExtractionRequest::default()
///     .with_destination(Destination::SiblingFolder)
///     .with_files_only(true)
///     .with_continuity_check(Some("downloads".to_string()))
///     .with_criteria(FilterCriteria::default().with_types(vec![".pdf".into()]));
/// assert!(request.files_only);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionRequest {
    /// Target directory.
    pub destination: Destination,

    /// Drop internal directory structure and place files at the root.
    pub files_only: bool,

    /// Substring the resolved destination must contain.
    pub continuity_check: Option<String>,

    /// Entry selection applied before extracting.
    pub criteria: FilterCriteria,

    /// Remove the archive file after a successful extraction.
    pub delete_source: bool,
}

impl ExtractionRequest {
    /// Creates a request that extracts every entry in place.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the destination.
    #[must_use]
    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }

    /// Sets files-only (flattened) extraction.
    #[must_use]
    pub fn with_files_only(mut self, files_only: bool) -> Self {
        self.files_only = files_only;
        self
    }

    /// Sets the continuity check substring.
    #[must_use]
    pub fn with_continuity_check(mut self, check: Option<String>) -> Self {
        self.continuity_check = check;
        self
    }

    /// Sets the filter criteria.
    #[must_use]
    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Sets whether the archive is deleted after extraction.
    #[must_use]
    pub fn with_delete_source(mut self, delete_source: bool) -> Self {
        self.delete_source = delete_source;
        self
    }
}
