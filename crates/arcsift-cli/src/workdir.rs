//! Scoped working-directory changes.

use anyhow::Context;
use anyhow::Result;
use std::env;
use std::path::Path;
use std::path::PathBuf;

/// Guard that switches the process working directory while held.
///
/// The previous directory is restored on drop, including when the command
/// returns an error or unwinds.
pub struct WorkingDirGuard {
    previous: PathBuf,
}

impl WorkingDirGuard {
    /// Changes into `dir` and remembers where we came from.
    pub fn enter(dir: &Path) -> Result<Self> {
        let previous = env::current_dir().context("failed to get current directory")?;
        env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
        tracing::debug!(dir = %dir.display(), "entered archive directory");
        Ok(Self { previous })
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.previous) {
            tracing::warn!(dir = %self.previous.display(), error = %e, "failed to restore working directory");
        }
    }
}
