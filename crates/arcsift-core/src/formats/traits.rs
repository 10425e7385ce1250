//! Common traits for archive format decoders.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::paths;

/// Trait for per-format decoders.
///
/// Every method takes the archive path and opens the file itself, so each
/// call is a self-contained open/read/close cycle.
pub trait ArchiveDecoder {
    /// Returns the archive format name.
    fn name(&self) -> &'static str;

    /// Returns `true` if the header bytes carry this format's signature.
    ///
    /// Must not panic on short or arbitrary input.
    fn matches_header(&self, header: &[u8]) -> bool;

    /// Lists member paths in container order.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be opened or parsed.
    fn list_members(&self, archive: &Path) -> Result<Vec<String>>;

    /// Returns the member names the container marks as directories.
    ///
    /// The default relies on the trailing-separator convention. Containers
    /// that store a directory flag instead (7z, RAR) override this.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be opened or parsed.
    fn directory_members(&self, archive: &Path) -> Result<HashSet<String>> {
        Ok(self
            .list_members(archive)?
            .into_iter()
            .filter(|entry| paths::is_directory_entry(entry))
            .collect())
    }

    /// Extracts the given members below `dest`, preserving relative paths.
    ///
    /// Returns the number of files written.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the archive or writing any file fails.
    fn extract_all(&self, archive: &Path, dest: &Path, members: &[String]) -> Result<usize>;

    /// Extracts a single member below `dest`.
    ///
    /// Returns the path of the written file, or `None` when the member is a
    /// directory placeholder or was not found.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the archive or writing the file fails.
    fn extract_one(&self, archive: &Path, dest: &Path, member: &str) -> Result<Option<PathBuf>>;
}
