//! ZIP archive decoder.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveError;
use crate::Result;

use super::common;
use super::traits::ArchiveDecoder;

/// Local file header signature.
const LOCAL_HEADER_MAGIC: [u8; 4] = *b"PK\x03\x04";

/// End-of-central-directory signature, the first record of an empty archive.
const EMPTY_ARCHIVE_MAGIC: [u8; 4] = *b"PK\x05\x06";

/// ZIP archive decoder backed by the `zip` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipDecoder;

fn open(archive: &Path) -> Result<zip::ZipArchive<BufReader<File>>> {
    let file = File::open(archive)?;
    zip::ZipArchive::new(BufReader::new(file))
        .map_err(|e| ArchiveError::InvalidArchive(format!("failed to open ZIP archive: {e}")))
}

fn entry_error(e: &zip::result::ZipError) -> ArchiveError {
    ArchiveError::InvalidArchive(format!("failed to read ZIP entry: {e}"))
}

impl ArchiveDecoder for ZipDecoder {
    fn name(&self) -> &'static str {
        "zip"
    }

    fn matches_header(&self, header: &[u8]) -> bool {
        header.starts_with(&LOCAL_HEADER_MAGIC) || header.starts_with(&EMPTY_ARCHIVE_MAGIC)
    }

    fn list_members(&self, archive: &Path) -> Result<Vec<String>> {
        let mut zip = open(archive)?;
        (0..zip.len())
            .map(|i| {
                zip.by_index_raw(i)
                    .map(|entry| entry.name().to_string())
                    .map_err(|e| entry_error(&e))
            })
            .collect()
    }

    fn extract_all(&self, archive: &Path, dest: &Path, members: &[String]) -> Result<usize> {
        let wanted = common::member_set(members);
        let mut zip = open(archive)?;
        let mut files_written = 0;

        for i in 0..zip.len() {
            let mut entry = zip.by_index(i).map_err(|e| entry_error(&e))?;
            if !wanted.contains(entry.name()) {
                continue;
            }

            let Some(relative) = entry.enclosed_name() else {
                tracing::warn!(entry = entry.name(), "skipping ZIP entry with unsafe path");
                continue;
            };
            let output_path = dest.join(relative);

            if entry.is_dir() {
                common::create_directory(&output_path)?;
            } else {
                common::write_file(&mut entry, &output_path)?;
                files_written += 1;
            }
        }

        Ok(files_written)
    }

    fn extract_one(&self, archive: &Path, dest: &Path, member: &str) -> Result<Option<PathBuf>> {
        let mut zip = open(archive)?;
        let mut entry = match zip.by_name(member) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(entry_error(&e)),
        };

        let Some(relative) = entry.enclosed_name() else {
            tracing::warn!(entry = member, "skipping ZIP entry with unsafe path");
            return Ok(None);
        };
        let output_path = dest.join(relative);

        if entry.is_dir() {
            common::create_directory(&output_path)?;
            return Ok(None);
        }

        common::write_file(&mut entry, &output_path)?;
        Ok(Some(output_path))
    }
}
