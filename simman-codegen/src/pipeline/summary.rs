//! Results of a directory run.

use std::path::PathBuf;

use simman_core::File;
use simman_ir::Manifest;

use super::Diagnostic;

/// Why a file was left as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unchanged {
    /// No binding qualified for rewriting.
    NothingToRewrite,
    /// A previous run already inserted a scaffold.
    AlreadyScaffolded,
    /// The file already binds the parser or namespace identifier.
    Conflict,
    /// Rewriting was attempted and rolled back.
    Aborted,
}

impl std::fmt::Display for Unchanged {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unchanged::NothingToRewrite => f.write_str("nothing to rewrite"),
            Unchanged::AlreadyScaffolded => f.write_str("already scaffolded"),
            Unchanged::Conflict => f.write_str("scaffold conflict"),
            Unchanged::Aborted => f.write_str("rewrite aborted"),
        }
    }
}

/// Outcome for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// The file was rewritten (or would be, in a dry run).
    Modified,
    Unchanged(Unchanged),
    /// The file could not be read or parsed and is not in the manifest.
    Skipped(String),
}

impl FileStatus {
    pub fn is_modified(&self) -> bool {
        matches!(self, FileStatus::Modified)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, FileStatus::Skipped(_))
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStatus::Modified => f.write_str("modified"),
            FileStatus::Unchanged(reason) => write!(f, "unchanged ({})", reason),
            FileStatus::Skipped(reason) => write!(f, "skipped: {}", reason),
        }
    }
}

/// Per-file summary of a run.
#[derive(Debug, Clone)]
pub struct FileSummary {
    pub file: String,
    /// Module-level bindings the classifier found.
    pub bindings_found: usize,
    /// Entries that made it into the manifest.
    pub configurable: usize,
    pub status: FileStatus,
    pub diagnostics: Vec<Diagnostic>,
}

/// Everything a directory run produced.
#[derive(Debug)]
pub struct DirectoryReport {
    pub directory: PathBuf,
    pub files: Vec<FileSummary>,
    pub manifest: Manifest,
    /// Path of the launcher, if one was written.
    pub launcher: Option<PathBuf>,
    /// Files that would be written, collected in dry runs only.
    pub previews: Vec<File>,
    pub dry_run: bool,
}

impl DirectoryReport {
    pub fn modified_count(&self) -> usize {
        self.files.iter().filter(|f| f.status.is_modified()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.files.iter().filter(|f| f.status.is_skipped()).count()
    }

    /// Total configurable entries across the manifest.
    pub fn entry_count(&self) -> usize {
        self.manifest.entry_count()
    }

    /// All diagnostics of all files.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files.iter().flat_map(|f| f.diagnostics.iter())
    }
}
