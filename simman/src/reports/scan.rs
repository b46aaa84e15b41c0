//! Scan command report data structures.

use std::path::PathBuf;

use simman_ir::Manifest;

use super::output::{Output, Report};

/// Report data from classifying a directory.
#[derive(Debug)]
pub struct ScanReport {
    pub directory: PathBuf,
    /// Files in name order.
    pub files: Vec<ScannedFile>,
    /// The manifest an extraction would produce.
    pub manifest: Manifest,
}

/// Classification of one file.
#[derive(Debug)]
pub struct ScannedFile {
    pub file: String,
    /// Why the file could not be classified.
    pub skipped: Option<String>,
    pub bindings: Vec<ScannedBinding>,
}

/// One module-level binding.
#[derive(Debug)]
pub struct ScannedBinding {
    pub name: String,
    pub line: usize,
    pub kind: &'static str,
    /// Python literal or (shortened) expression text.
    pub value: String,
    pub flag: Option<String>,
}

impl Report for ScanReport {
    fn render(&self, out: &mut dyn Output) {
        out.heading(&format!("Bindings in {}", self.directory.display()));
        for file in &self.files {
            out.group(&file.file);
            if let Some(reason) = &file.skipped {
                out.warning(&format!("{}: {}", file.file, reason));
                out.item("skipped");
            } else if file.bindings.is_empty() {
                out.item("no module-level bindings");
            }

            for binding in &file.bindings {
                let flag = binding
                    .flag
                    .as_deref()
                    .map(|f| format!("  -> {}", f))
                    .unwrap_or_default();
                out.item(&format!(
                    "{:>4}  {:<20} {:<14} {}{}",
                    binding.line, binding.name, binding.kind, binding.value, flag
                ));
            }
            out.blank();
        }

        out.field(
            "Configurable variables",
            &format!(
                "{} in {} files",
                self.manifest.entry_count(),
                self.manifest.len()
            ),
        );
    }
}
