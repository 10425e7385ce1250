//! Gzip decoder.
//!
//! A gzip file carries exactly one compressed stream and no member names.
//! The single member is named after the archive itself with its final
//! extension removed (`notes.txt.gz` → `notes.txt`).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use flate2::read::GzDecoder;

use crate::Result;
use crate::paths;

use super::common;
use super::traits::ArchiveDecoder;

/// Gzip member header: ID1, ID2.
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Gzip decoder backed by `flate2`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GzipDecoder;

/// Name of the single payload stored in a gzip file.
fn payload_name(archive: &Path) -> String {
    paths::file_name(archive, false)
}

fn decompress_to(archive: &Path, output_path: &Path) -> Result<u64> {
    let file = File::open(archive)?;
    let mut decoder = GzDecoder::new(BufReader::new(file));
    common::write_file(&mut decoder, output_path)
}

impl ArchiveDecoder for GzipDecoder {
    fn name(&self) -> &'static str {
        "gzip"
    }

    fn matches_header(&self, header: &[u8]) -> bool {
        header.starts_with(&GZIP_MAGIC)
    }

    fn list_members(&self, archive: &Path) -> Result<Vec<String>> {
        Ok(vec![payload_name(archive)])
    }

    /// Decompresses the payload into `dest` whenever it was selected.
    ///
    /// There is no internal structure, so this is always a flat write.
    fn extract_all(&self, archive: &Path, dest: &Path, members: &[String]) -> Result<usize> {
        let name = payload_name(archive);
        if !members.contains(&name) {
            return Ok(0);
        }
        decompress_to(archive, &dest.join(&name))?;
        Ok(1)
    }

    fn extract_one(&self, archive: &Path, dest: &Path, member: &str) -> Result<Option<PathBuf>> {
        let name = payload_name(archive);
        if member != name {
            return Ok(None);
        }
        let output_path = dest.join(name);
        decompress_to(archive, &output_path)?;
        Ok(Some(output_path))
    }
}
