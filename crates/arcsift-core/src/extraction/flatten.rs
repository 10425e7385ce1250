//! Files-only extraction.
//!
//! Members are written one at a time, each into its natural relative
//! location, then moved up to the destination root. The directory skeleton
//! left behind is pruned afterwards.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::ArchiveError;
use crate::ArchiveFile;
use crate::ExtractionReport;
use crate::Result;
use crate::formats::ArchiveDecoder;
use crate::formats::common;
use crate::paths;
use crate::report::ProgressCallback;

/// Extracts `selected` flattened into `report.destination`.
///
/// Stops at the first failing member. Members already moved stay where they
/// are; nothing is rolled back.
pub(super) fn extract_flat(
    archive: &ArchiveFile,
    selected: &[String],
    report: &mut ExtractionReport,
    progress: &mut dyn ProgressCallback,
) -> Result<()> {
    let decoder = archive.format().decoder();
    let destination = report.destination.clone();
    let directories = decoder.directory_members(archive.full_path())?;

    let files: Vec<&str> = selected
        .iter()
        .map(String::as_str)
        .filter(|entry| !directories.contains(*entry) && !paths::is_directory_entry(entry))
        .collect();
    let total = files.len();

    for (index, member) in files.iter().enumerate() {
        progress.on_entry_start(Path::new(member), total, index + 1);

        place_member(decoder, archive.full_path(), &destination, member, report).map_err(
            |source| ArchiveError::PartialExtraction {
                completed: index,
                member: (*member).to_string(),
                source: Box::new(source),
            },
        )?;

        progress.on_entry_complete(Path::new(member));
    }

    let all = decoder.list_members(archive.full_path())?;
    prune_entry_directories(&destination, &all, &directories, report);
    Ok(())
}

/// Extracts one member and moves it to the destination root.
fn place_member(
    decoder: &dyn ArchiveDecoder,
    archive: &Path,
    destination: &Path,
    member: &str,
    report: &mut ExtractionReport,
) -> Result<()> {
    let Some(written) = decoder.extract_one(archive, destination, member)? else {
        report.add_warning(format!("'{member}' was not extracted as a file"));
        return Ok(());
    };
    report.files_extracted += 1;

    let Some(name) = written.file_name() else {
        return Ok(());
    };
    let target = destination.join(name);
    if written == target {
        return Ok(());
    }

    if target.is_dir() {
        tracing::warn!(member, target = %target.display(), "cannot flatten over a directory");
        report.add_warning(format!(
            "'{member}' left in place: {} is a directory",
            target.display()
        ));
        return Ok(());
    }
    if target.exists() {
        report.add_warning(format!(
            "'{}' overwritten by '{member}'",
            name.to_string_lossy()
        ));
    }

    fs::rename(&written, &target)?;
    report.files_flattened += 1;
    tracing::trace!(member, target = %target.display(), "flattened entry");
    Ok(())
}

/// Relative directories implied by archive entries: explicit directory
/// entries plus every ancestor of every entry.
fn entry_directories(entries: &[String], explicit: &HashSet<String>) -> HashSet<PathBuf> {
    let mut directories = HashSet::new();

    for entry in entries {
        let Some(relative) = common::enclosed_path(entry) else {
            continue;
        };
        let deepest = if explicit.contains(entry) || paths::is_directory_entry(entry) {
            Some(relative.as_path())
        } else {
            relative.parent()
        };
        for dir in deepest.into_iter().flat_map(Path::ancestors) {
            if !dir.as_os_str().is_empty() {
                directories.insert(dir.to_path_buf());
            }
        }
    }

    directories
}

fn is_empty_dir(path: &Path) -> bool {
    fs::read_dir(path).is_ok_and(|mut entries| entries.next().is_none())
}

/// Removes the empty directories under `destination` that correspond to
/// archive entries, deepest first.
///
/// Directories that still hold anything are kept, so user data already in
/// the destination is never touched. Failures become report warnings.
fn prune_entry_directories(
    destination: &Path,
    entries: &[String],
    explicit: &HashSet<String>,
    report: &mut ExtractionReport,
) {
    let candidates = entry_directories(entries, explicit);
    let Some(max_depth) = candidates.iter().map(|dir| dir.components().count()).max() else {
        return;
    };

    let walker = WalkDir::new(destination)
        .min_depth(1)
        .max_depth(max_depth)
        .contents_first(true);

    for item in walker {
        let item = match item {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!(error = %e, "failed to walk destination while pruning");
                continue;
            }
        };
        if !item.file_type().is_dir() {
            continue;
        }
        let Ok(relative) = item.path().strip_prefix(destination) else {
            continue;
        };
        if !candidates.contains(relative) || !is_empty_dir(item.path()) {
            continue;
        }

        match fs::remove_dir(item.path()) {
            Ok(()) => {
                report.directories_pruned += 1;
                tracing::debug!(path = %item.path().display(), "pruned empty directory");
            }
            Err(e) => {
                tracing::warn!(path = %item.path().display(), error = %e, "failed to prune directory");
                report.add_warning(format!(
                    "could not remove {}: {e}",
                    item.path().display()
                ));
            }
        }
    }
}
