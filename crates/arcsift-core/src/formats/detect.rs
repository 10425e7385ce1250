//! Archive format detection from header bytes.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::ArchiveError;
use crate::Result;

use super::gzip::GzipDecoder;
use super::rar::RarDecoder;
use super::sevenz::SevenZDecoder;
use super::traits::ArchiveDecoder;
use super::zip::ZipDecoder;

/// Number of leading bytes read when probing a file.
pub const HEADER_LEN: usize = 8;

/// Supported container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    /// ZIP archive.
    Zip,
    /// RAR archive (v4 or v5).
    Rar,
    /// 7z archive.
    SevenZip,
    /// Single-stream gzip file.
    Gzip,
}

impl ArchiveFormat {
    /// Formats in the order their signatures are probed.
    pub const PROBE_ORDER: [Self; 4] = [Self::Rar, Self::Zip, Self::SevenZip, Self::Gzip];

    /// Returns the decoder handling this format.
    #[must_use]
    pub fn decoder(self) -> &'static dyn ArchiveDecoder {
        match self {
            Self::Zip => &ZipDecoder,
            Self::Rar => &RarDecoder,
            Self::SevenZip => &SevenZDecoder,
            Self::Gzip => &GzipDecoder,
        }
    }

    /// Returns the format name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.decoder().name()
    }

    /// Number of extensions stripped when deriving a folder name.
    ///
    /// Gzip usually wraps another container (`.tar.gz`), so both suffixes go.
    #[must_use]
    pub const fn folder_suffixes(self) -> usize {
        match self {
            Self::Gzip => 2,
            Self::Zip | Self::Rar | Self::SevenZip => 1,
        }
    }

    /// Classifies a header buffer.
    ///
    /// Never fails: short or unknown buffers return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcsift_core::ArchiveFormat;
    ///
    /// assert_eq!(ArchiveFormat::from_header(b"PK\x03\x04...."), Some(ArchiveFormat::Zip));
    /// assert_eq!(ArchiveFormat::from_header(b"\x1f\x8b\x08"), Some(ArchiveFormat::Gzip));
    /// assert_eq!(ArchiveFormat::from_header(b"hello"), None);
    /// ```
    #[must_use]
    pub fn from_header(header: &[u8]) -> Option<Self> {
        Self::PROBE_ORDER
            .into_iter()
            .find(|format| format.decoder().matches_header(header))
    }
}

impl std::fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Reads up to [`HEADER_LEN`] bytes from the start of a file.
fn read_header(path: &Path) -> std::io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(HEADER_LEN);
    file.take(HEADER_LEN as u64).read_to_end(&mut header)?;
    Ok(header)
}

/// Classifies a file by its signature.
///
/// Returns `None` when the file cannot be read or matches no signature.
pub fn classify(path: &Path) -> Option<ArchiveFormat> {
    match read_header(path) {
        Ok(header) => {
            let format = ArchiveFormat::from_header(&header);
            tracing::debug!(path = %path.display(), ?format, "probed archive signature");
            format
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "failed to read archive header");
            None
        }
    }
}

/// Detects the archive format of a file.
///
/// # Errors
///
/// Returns [`ArchiveError::UnsupportedFormat`] if no signature matches.
pub fn detect_format(path: &Path) -> Result<ArchiveFormat> {
    classify(path).ok_or_else(|| ArchiveError::UnsupportedFormat {
        path: path.to_path_buf(),
    })
}
