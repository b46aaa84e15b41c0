//! Extract operation - rewrite scripts and write the launcher.

use std::{
    path::Path,
    sync::atomic::{AtomicUsize, Ordering},
};

use eyre::{Context, Result};
use simman_codegen::pipeline::{DirectoryReport, FileSummary, Pipeline, Plugin, Severity};
use simman_core::Settings;
use simman_ir::{ConfigurationEntry, LiteralValue};

use crate::reports::{ExtractReport, PreviewFile};

/// Example invocations shown per modified file.
const EXAMPLES_PER_FILE: usize = 2;

/// Options for the extract operation.
pub struct ExtractOptions {
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Prints one line per file as the pipeline finishes it.
#[derive(Default)]
struct TallyPlugin {
    done: AtomicUsize,
}

impl Plugin for TallyPlugin {
    fn name(&self) -> &'static str {
        "tally"
    }

    fn on_file_done(&self, summary: &FileSummary) -> Result<()> {
        let index = self.done.fetch_add(1, Ordering::SeqCst) + 1;
        println!(
            "[{}] {}: {} ({} of {} bindings configurable)",
            index, summary.file, summary.status, summary.configurable, summary.bindings_found
        );
        Ok(())
    }
}

/// Execute the extract operation.
///
/// Runs the pipeline over the directory and collects what the summary needs.
pub fn extract(dir: &Path, settings: &Settings, opts: ExtractOptions) -> Result<ExtractReport> {
    let report = Pipeline::new()
        .dry_run(opts.dry_run)
        .plugin(TallyPlugin::default())
        .run(dir, settings)
        .wrap_err_with(|| format!("Failed to process {}", dir.display()))?;

    Ok(build_report(&report, &settings.extract.launcher))
}

fn build_report(report: &DirectoryReport, launcher_name: &str) -> ExtractReport {
    let warnings = report
        .diagnostics()
        .filter(|d| !matches!(d.severity, Severity::Info))
        .map(|d| match &d.location {
            Some(loc) => format!("{}\n  --> {}", d.message, loc),
            None => d.message.clone(),
        })
        .collect();

    let examples = report
        .files
        .iter()
        .filter(|s| s.status.is_modified())
        .filter_map(|s| report.manifest.get(&s.file))
        .flat_map(|config| {
            config
                .entries()
                .iter()
                .take(EXAMPLES_PER_FILE)
                .map(move |entry| example_command(config.file(), entry))
        })
        .collect();

    let previews = report
        .previews
        .iter()
        .map(|file| PreviewFile {
            path: file
                .path()
                .strip_prefix(&report.directory)
                .unwrap_or(file.path())
                .display()
                .to_string(),
            content: file.content().to_string(),
        })
        .collect();

    ExtractReport {
        directory: report.directory.clone(),
        dry_run: report.dry_run,
        scanned: report.files.len(),
        modified: report.modified_count(),
        skipped: report.skipped_count(),
        entries: report.entry_count(),
        warnings,
        examples,
        launcher: report.launcher.clone(),
        launcher_name: launcher_name.to_string(),
        previews,
    }
}

/// A command line that overrides one entry with its own default.
fn example_command(file: &str, entry: &ConfigurationEntry) -> String {
    format!("python {} {} {}", file, entry.arg(), shell_value(&entry.value))
}

fn shell_value(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Bool(b) => b.to_string(),
        LiteralValue::Str(s) if s.is_empty() || s.contains(char::is_whitespace) => {
            format!("'{}'", s.replace('\'', r"'\''"))
        }
        other => other.to_string(),
    }
}
