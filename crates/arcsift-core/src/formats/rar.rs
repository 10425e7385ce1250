//! RAR archive decoder.
//!
//! Backed by the `unrar` crate (bindings to the reference unrar library).
//! Both RAR4 and RAR5 archives are supported; encrypted archives fail with
//! [`ArchiveError::InvalidArchive`].

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use unrar::Archive;
use unrar::error::UnrarError;

use crate::ArchiveError;
use crate::Result;

use super::common;
use super::traits::ArchiveDecoder;

/// RAR 1.5 - 4.x signature.
const RAR4_MAGIC: [u8; 7] = *b"Rar!\x1a\x07\x00";

/// RAR 5.0 signature.
const RAR5_MAGIC: [u8; 8] = *b"Rar!\x1a\x07\x01\x00";

/// RAR archive decoder.
#[derive(Debug, Default, Clone, Copy)]
pub struct RarDecoder;

impl From<UnrarError> for ArchiveError {
    fn from(err: UnrarError) -> Self {
        Self::InvalidArchive(format!("RAR error: {err}"))
    }
}

fn entry_name(filename: &Path) -> String {
    filename.to_string_lossy().replace('\\', "/")
}

/// Walks the archive, extracting the entries for which `wanted` returns
/// `true` and skipping the rest. Returns the written file paths.
fn process<F>(archive: &Path, dest: &Path, mut wanted: F) -> Result<Vec<PathBuf>>
where
    F: FnMut(&str) -> bool,
{
    let mut written = Vec::new();
    let mut cursor = Archive::new(archive).open_for_processing()?;

    while let Some(header) = cursor.read_header()? {
        let entry = header.entry();
        let name = entry_name(&entry.filename);

        if !wanted(&name) {
            cursor = header.skip()?;
            continue;
        }

        let Some(relative) = common::enclosed_path(&name) else {
            tracing::warn!(entry = %name, "skipping RAR entry with unsafe path");
            cursor = header.skip()?;
            continue;
        };
        let output_path = dest.join(relative);

        if entry.is_directory() {
            common::create_directory(&output_path)?;
            cursor = header.skip()?;
        } else {
            if let Some(parent) = output_path.parent() {
                common::create_directory(parent)?;
            }
            cursor = header.extract_to(&output_path)?;
            written.push(output_path);
        }
    }

    Ok(written)
}

impl ArchiveDecoder for RarDecoder {
    fn name(&self) -> &'static str {
        "rar"
    }

    fn matches_header(&self, header: &[u8]) -> bool {
        header.starts_with(&RAR4_MAGIC) || header.starts_with(&RAR5_MAGIC)
    }

    fn list_members(&self, archive: &Path) -> Result<Vec<String>> {
        let listing = Archive::new(archive).open_for_listing()?;
        listing
            .map(|entry| {
                entry
                    .map(|header| entry_name(&header.filename))
                    .map_err(ArchiveError::from)
            })
            .collect()
    }

    fn directory_members(&self, archive: &Path) -> Result<HashSet<String>> {
        let listing = Archive::new(archive).open_for_listing()?;
        let mut directories = HashSet::new();
        for header in listing {
            let header = header?;
            if header.is_directory() {
                directories.insert(entry_name(&header.filename));
            }
        }
        Ok(directories)
    }

    fn extract_all(&self, archive: &Path, dest: &Path, members: &[String]) -> Result<usize> {
        let wanted = common::member_set(members);
        let written = process(archive, dest, |name| wanted.contains(name))?;
        Ok(written.len())
    }

    fn extract_one(&self, archive: &Path, dest: &Path, member: &str) -> Result<Option<PathBuf>> {
        let mut found = false;
        let written = process(archive, dest, |name| {
            // Only the first entry with this name is taken.
            let take = !found && name == member;
            found |= take;
            take
        })?;
        Ok(written.into_iter().next())
    }
}
