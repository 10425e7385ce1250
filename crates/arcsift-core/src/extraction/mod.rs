//! Extraction pipeline.
//!
//! A run walks through resolve, validate, list and filter, the empty check,
//! destination creation and the entry writes, in that order. Every refusal
//! happens before the destination directory is created.

mod flatten;

use std::path::Path;
use std::time::Instant;

use crate::ArchiveError;
use crate::ArchiveFile;
use crate::ExtractionReport;
use crate::Result;
use crate::config::ExtractionRequest;
use crate::filter::filter_entries;
use crate::planner;
use crate::report::ProgressCallback;

/// Runs one extraction of `archive` as described by `request`.
pub(crate) fn run(
    archive: &ArchiveFile,
    request: &ExtractionRequest,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let start = Instant::now();

    let destination = planner::plan_destination(
        archive,
        &request.destination,
        request.continuity_check.as_deref(),
    )?;

    let decoder = archive.format().decoder();
    let all = decoder.list_members(archive.full_path())?;
    let selected = filter_entries(&all, &request.criteria)?;
    if selected.is_empty() {
        return Err(ArchiveError::EmptyFilterResult {
            criteria: request.criteria.clone(),
        });
    }

    planner::prepare_destination(&destination)?;

    tracing::info!(
        archive = %archive.full_path().display(),
        destination = %destination.display(),
        entries = selected.len(),
        files_only = request.files_only,
        "extracting archive"
    );

    let mut report = ExtractionReport::new(destination, archive.format());

    if request.files_only {
        flatten::extract_flat(archive, &selected, &mut report, progress)?;
    } else {
        report.files_extracted =
            decoder.extract_all(archive.full_path(), &report.destination, &selected)?;
        let total = selected.len();
        for (index, entry) in selected.iter().enumerate() {
            progress.on_entry_start(Path::new(entry), total, index + 1);
            progress.on_entry_complete(Path::new(entry));
        }
    }

    progress.on_complete();
    report.entries = selected;
    report.duration = start.elapsed();

    tracing::info!(
        destination = %report.destination.display(),
        files = report.files_extracted,
        pruned = report.directories_pruned,
        "extraction finished"
    );

    Ok(report)
}
