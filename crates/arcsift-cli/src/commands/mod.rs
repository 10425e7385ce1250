//! Subcommand implementations.

pub mod completion;
pub mod extract;
pub mod relocate;
pub mod view;

use anyhow::Context;
use anyhow::Result;
use arcsift_core::FilterCriteria;
use arcsift_core::paths;
use std::path::Path;
use std::path::PathBuf;

use crate::cli::FilterArgs;
use crate::workdir::WorkingDirGuard;

impl FilterArgs {
    /// Builds core filter criteria from the shared filter flags.
    pub fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria::default()
            .with_files(self.files.clone())
            .with_types(self.types.clone())
            .with_patterns(self.patterns.clone())
            .with_exclusive(self.exclusive)
    }
}

/// Resolves the archive path and switches into its directory.
///
/// Relative destinations given afterwards resolve against the archive's
/// directory. The returned guard restores the working directory on drop.
/// A missing archive leaves the working directory alone so the core can
/// report it.
pub fn enter_archive_dir(archive: &Path) -> Result<(PathBuf, Option<WorkingDirGuard>)> {
    let absolute = paths::absolute(archive).context("failed to resolve archive path")?;
    let guard = match absolute.parent() {
        Some(dir) if paths::is_directory(dir) => Some(WorkingDirGuard::enter(dir)?),
        _ => None,
    };
    Ok((absolute, guard))
}
