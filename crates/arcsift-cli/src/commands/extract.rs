//! Extract command implementation.

use super::enter_archive_dir;
use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use arcsift_core::Destination;
use arcsift_core::ExtractionRequest;
use arcsift_core::NoopProgress;
use arcsift_core::extract_archive_with_progress;
use arcsift_core::paths;
use std::env;
use std::path::Path;

pub fn execute(
    args: &ExtractArgs,
    formatter: &dyn OutputFormatter,
    quiet: bool,
    json: bool,
) -> Result<()> {
    // --current-dir and --folder-name are relative to where arcsift was started.
    let invocation_dir = env::current_dir().context("failed to get current directory")?;
    let destination = destination_for(args, &invocation_dir);

    let request = ExtractionRequest::new()
        .with_destination(destination)
        .with_files_only(args.files_only)
        .with_continuity_check(args.check.clone())
        .with_criteria(args.filter.to_criteria())
        .with_delete_source(args.delete_archive);

    let (archive, _guard) = enter_archive_dir(&args.archive)?;

    let report = if CliProgress::should_show(quiet, json) {
        let mut progress = CliProgress::new("Extracting");
        add_archive_context(
            extract_archive_with_progress(&archive, &request, &mut progress),
            &args.archive,
        )?
    } else {
        let mut noop = NoopProgress;
        add_archive_context(
            extract_archive_with_progress(&archive, &request, &mut noop),
            &args.archive,
        )?
    };

    formatter.format_extraction_result(&report)?;

    Ok(())
}

/// Maps the mutually exclusive destination flags onto a core destination.
fn destination_for(args: &ExtractArgs, invocation_dir: &Path) -> Destination {
    if let Some(path) = &args.path {
        Destination::from_requested(Some(path))
    } else if args.default_folder {
        Destination::SiblingFolder
    } else if args.current_dir {
        Destination::Path(invocation_dir.join(paths::file_name(&args.archive, false)))
    } else if let Some(name) = &args.folder_name {
        Destination::Path(invocation_dir.join(name))
    } else {
        Destination::ArchiveDirectory
    }
}
