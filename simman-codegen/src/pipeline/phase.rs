//! Pipeline phase trait.

use simman_core::{ExtractSettings, Result};

use super::FileContext;

/// A per-file phase of the extraction pipeline.
///
/// Built-in phases, in order:
/// - `ReadPhase` - reads the file
/// - `ParsePhase` - parses, classifies and inspects the layout
/// - `ModelPhase` - builds the file configuration
/// - `RewritePhase` - generates the scaffold and rewrites literals
/// - `WritePhase` - writes the result back
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    /// Run this phase on one file.
    ///
    /// # Errors
    ///
    /// An error stops processing of this file only. Non-fatal issues should
    /// be recorded as diagnostics instead.
    fn run(&self, ctx: &mut FileContext, settings: &ExtractSettings) -> Result<()>;
}
