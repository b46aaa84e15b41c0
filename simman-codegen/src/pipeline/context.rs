//! Per-file state passed through pipeline phases.

use std::path::PathBuf;

use simman_ir::{Binding, FileConfiguration};
use simman_python::{ExistingScaffold, Layout, PythonModule};

use super::diagnostic::Diagnostic;
use crate::rewrite::Rewrite;

/// Context passed through all phases for one file.
///
/// Each phase fills in its part; later phases skip their work when an
/// earlier one left its slot empty.
#[derive(Debug)]
pub struct FileContext {
    /// File name relative to the processed directory.
    pub file: String,
    pub path: PathBuf,
    /// Collect output instead of writing it.
    pub dry_run: bool,
    /// Raw source (populated by ReadPhase).
    pub source: Option<String>,
    /// Parsed module (populated by ParsePhase).
    pub module: Option<PythonModule>,
    pub layout: Option<Layout>,
    pub bindings: Vec<Binding>,
    /// Scaffold left by a previous run, if any.
    pub scaffold: Option<ExistingScaffold>,
    /// Configuration (populated by ModelPhase).
    pub config: Option<FileConfiguration>,
    /// Rewritten text (populated by RewritePhase).
    pub rewrite: Option<Rewrite>,
    /// Whether the rewritten text reached the disk.
    pub written: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileContext {
    pub fn new(file: impl Into<String>, path: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            file: file.into(),
            path: path.into(),
            dry_run,
            source: None,
            module: None,
            layout: None,
            bindings: Vec::new(),
            scaffold: None,
            config: None,
            rewrite: None,
            written: false,
            diagnostics: Vec::new(),
        }
    }
}
