//! 7z archive decoder.
//!
//! Listing reads the archive header only. Extraction walks every entry with
//! the `sevenz-rust2` callback API; unwanted entries are drained instead of
//! written, because solid blocks must be decoded in order anyway.
//!
//! Encrypted archives are rejected: no password is ever supplied.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use sevenz_rust2::Archive;
use sevenz_rust2::Password;

use crate::ArchiveError;
use crate::Result;

use super::common;
use super::traits::ArchiveDecoder;

/// 7z signature: "7z" followed by `BC AF 27 1C`.
const SEVENZ_MAGIC: [u8; 6] = [0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C];

/// 7z archive decoder.
#[derive(Debug, Default, Clone, Copy)]
pub struct SevenZDecoder;

/// Converts sevenz-rust2 errors to our `ArchiveError` type.
impl From<sevenz_rust2::Error> for ArchiveError {
    fn from(err: sevenz_rust2::Error) -> Self {
        let err_str = err.to_string();
        let err_lower = err_str.to_lowercase();

        if err_lower.contains("password") || err_lower.contains("encrypt") {
            return Self::InvalidArchive(format!(
                "encrypted 7z archive: {err_str}. Password-protected archives are not supported"
            ));
        }

        if err_lower.contains("i/o") {
            return Self::Io(std::io::Error::other(err_str));
        }

        Self::InvalidArchive(format!("7z error: {err_str}"))
    }
}

/// Reads the archive header without decoding any entry data.
fn read_archive(path: &Path) -> Result<Archive> {
    let mut source = BufReader::new(File::open(path)?);
    let password = Password::empty();
    Ok(Archive::read(&mut source, &password)?)
}

/// Walks every entry, writing those for which `wanted` returns `true`.
fn process<F>(archive: &Path, dest: &Path, mut wanted: F) -> Result<Vec<PathBuf>>
where
    F: FnMut(&str) -> bool,
{
    let source = BufReader::new(File::open(archive)?);
    let written = RefCell::new(Vec::new());

    let extract_fn = |entry: &sevenz_rust2::ArchiveEntry,
                      reader: &mut dyn Read,
                      _dest_dir: &PathBuf|
     -> std::result::Result<bool, sevenz_rust2::Error> {
        let skip = |reader: &mut dyn Read| {
            std::io::copy(reader, &mut std::io::sink())
                .map(|_| true)
                .map_err(|e| sevenz_rust2::Error::Other(format!("skip failed: {e}").into()))
        };

        // The archive root shows up as a nameless directory entry.
        if !wanted(&entry.name) || (entry.is_directory() && entry.name.is_empty()) {
            return skip(reader);
        }

        let Some(relative) = common::enclosed_path(&entry.name) else {
            tracing::warn!(entry = %entry.name, "skipping 7z entry with unsafe path");
            return skip(reader);
        };
        let output_path = dest.join(relative);

        let result = if entry.is_directory() {
            common::create_directory(&output_path)
        } else {
            common::write_file(reader, &output_path).map(|_| {
                written.borrow_mut().push(output_path);
            })
        };
        result
            .map(|()| true)
            .map_err(|e| sevenz_rust2::Error::Other(format!("write failed: {e}").into()))
    };

    sevenz_rust2::decompress_with_extract_fn(source, dest, extract_fn)?;

    Ok(written.into_inner())
}

impl ArchiveDecoder for SevenZDecoder {
    fn name(&self) -> &'static str {
        "7z"
    }

    fn matches_header(&self, header: &[u8]) -> bool {
        header.starts_with(&SEVENZ_MAGIC)
    }

    fn list_members(&self, archive: &Path) -> Result<Vec<String>> {
        let archive = read_archive(archive)?;
        Ok(archive.files.iter().map(|e| e.name.clone()).collect())
    }

    fn directory_members(&self, archive: &Path) -> Result<HashSet<String>> {
        let archive = read_archive(archive)?;
        Ok(archive
            .files
            .iter()
            .filter(|e| e.is_directory())
            .map(|e| e.name.clone())
            .collect())
    }

    fn extract_all(&self, archive: &Path, dest: &Path, members: &[String]) -> Result<usize> {
        let wanted = common::member_set(members);
        let written = process(archive, dest, |name| wanted.contains(name))?;
        Ok(written.len())
    }

    fn extract_one(&self, archive: &Path, dest: &Path, member: &str) -> Result<Option<PathBuf>> {
        let mut found = false;
        let written = process(archive, dest, |name| {
            let take = !found && name == member;
            found |= take;
            take
        })?;
        Ok(written.into_iter().next())
    }
}
