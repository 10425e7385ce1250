//! Move command implementation

use super::enter_archive_dir;
use crate::cli::MoveArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use arcsift_core::move_archive;

pub fn execute(args: &MoveArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    // A relative DEST_DIR is taken from the archive's directory.
    let (archive, _guard) = enter_archive_dir(&args.archive)?;
    let moved = add_archive_context(move_archive(&archive, &args.dest_dir), &args.archive)?;

    formatter.format_move_result(&archive, &moved)?;

    Ok(())
}
