//! Observers of a pipeline run.

use eyre::Result;

use super::{FileContext, FileSummary};

/// Hooks called while a directory is processed.
///
/// Every hook defaults to doing nothing. Returning an error from any hook
/// stops the whole run; per-file failures are not errors here and arrive
/// through [`FileSummary::status`] instead.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Before `phase` runs on `ctx.file`.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &FileContext) -> Result<()> {
        Ok(())
    }

    /// After `phase` succeeded. Not called for the phase that failed.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &FileContext) -> Result<()> {
        Ok(())
    }

    /// Once per candidate file, whatever its status.
    #[allow(unused_variables)]
    fn on_file_done(&self, summary: &FileSummary) -> Result<()> {
        Ok(())
    }
}
