//! View command implementation

use super::enter_archive_dir;
use crate::cli::ViewArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use arcsift_core::ArchiveFile;

pub fn execute(args: &ViewArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let criteria = args.filter.to_criteria();

    let (path, _guard) = enter_archive_dir(&args.archive)?;
    let mut archive = add_archive_context(ArchiveFile::open(&path), &args.archive)?;
    let entries = add_archive_context(archive.read_contents(&criteria), &args.archive)?;

    formatter.format_listing(&args.archive, entries)?;

    Ok(())
}
