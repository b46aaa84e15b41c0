//! Extract command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from a directory extraction.
#[derive(Debug)]
pub struct ExtractReport {
    /// Processed directory.
    pub directory: PathBuf,
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Candidate files found.
    pub scanned: usize,
    /// Files rewritten (or that would be).
    pub modified: usize,
    /// Files that could not be read or parsed.
    pub skipped: usize,
    /// Configurable variables across the manifest.
    pub entries: usize,
    /// Warning and error messages from the pipeline.
    pub warnings: Vec<String>,
    /// Example invocations using the new flags.
    pub examples: Vec<String>,
    /// Path of the written launcher.
    pub launcher: Option<PathBuf>,
    /// Configured launcher file name.
    pub launcher_name: String,
    /// Files that would be written, in dry runs.
    pub previews: Vec<PreviewFile>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// Path relative to the processed directory.
    pub path: String,
    /// File content.
    pub content: String,
}

impl Report for ExtractReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        for preview in &self.previews {
            out.blank();
            out.file_preview(&preview.path, &preview.content);
        }

        out.blank();
        out.heading(if self.dry_run { "Summary (dry run)" } else { "Summary" });
        out.field("Directory", &self.directory.display().to_string());
        out.field("Files scanned", &self.scanned.to_string());
        let modified_label = if self.dry_run {
            "Files to rewrite"
        } else {
            "Files rewritten"
        };
        out.field(modified_label, &self.modified.to_string());
        if self.skipped > 0 {
            out.field("Files skipped", &self.skipped.to_string());
        }
        out.field("Configurable variables", &self.entries.to_string());

        if !self.examples.is_empty() {
            out.blank();
            out.group("Examples");
            for example in &self.examples {
                out.item(example);
            }
        }

        out.blank();
        match (&self.launcher, self.dry_run) {
            (Some(path), _) => {
                out.field("Launcher", &path.display().to_string());
                out.text(&format!(
                    "Run `python {}` to pick a script and adjust its values.",
                    self.launcher_name
                ));
            }
            (None, true) if !self.previews.is_empty() => {
                out.text(&format!(
                    "{} files would be written; nothing was changed.",
                    self.previews.len()
                ));
            }
            (None, _) => out.text("No script could be parsed; no launcher was written."),
        }
    }
}
