//! Scan operation - classify bindings without touching the files.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex},
};

use eyre::{Context, Result, eyre};
use simman_codegen::{
    literal::python_literal,
    pipeline::{FileContext, FileStatus, Pipeline, Plugin},
};
use simman_core::Settings;
use simman_ir::{Binding, BindingValue, EntryOrigin};

use crate::reports::{ScanReport, ScannedBinding, ScannedFile};

/// Longest expression text shown before it is cut.
const MAX_EXPRESSION_WIDTH: usize = 48;

type Captured = Arc<Mutex<HashMap<String, Vec<ScannedBinding>>>>;

/// Records every binding once the model phase has classified it.
struct CapturePlugin {
    files: Captured,
}

impl Plugin for CapturePlugin {
    fn name(&self) -> &'static str {
        "capture"
    }

    fn on_after_phase(&self, phase: &str, ctx: &FileContext) -> Result<()> {
        if phase != "model" {
            return Ok(());
        }
        let rows = ctx
            .bindings
            .iter()
            .map(|binding| scanned_binding(binding, ctx))
            .collect();
        self.files
            .lock()
            .map_err(|_| eyre!("scan results lock poisoned"))?
            .insert(ctx.file.clone(), rows);
        Ok(())
    }
}

/// Execute the scan operation.
///
/// Runs the pipeline as a dry run, so nothing is written.
pub fn scan(dir: &Path, settings: &Settings) -> Result<ScanReport> {
    let captured = Captured::default();
    let report = Pipeline::new()
        .dry_run(true)
        .plugin(CapturePlugin {
            files: captured.clone(),
        })
        .run(dir, settings)
        .wrap_err_with(|| format!("Failed to scan {}", dir.display()))?;

    let mut captured = std::mem::take(
        &mut *captured
            .lock()
            .map_err(|_| eyre!("scan results lock poisoned"))?,
    );

    let files = report
        .files
        .iter()
        .map(|summary| ScannedFile {
            file: summary.file.clone(),
            skipped: match &summary.status {
                FileStatus::Skipped(reason) => Some(reason.clone()),
                _ => None,
            },
            bindings: captured.remove(&summary.file).unwrap_or_default(),
        })
        .collect();

    Ok(ScanReport {
        directory: report.directory,
        files,
        manifest: report.manifest,
    })
}

fn scanned_binding(binding: &Binding, ctx: &FileContext) -> ScannedBinding {
    let entry = ctx.config.as_ref().and_then(|c| c.get(&binding.name));

    let kind = match (entry.map(|e| e.origin), binding.ambiguity, &binding.value) {
        (Some(EntryOrigin::Literal), _, _) => "configurable",
        (Some(EntryOrigin::Scaffold), _, _) => "scaffolded",
        (None, Some(_), _) => "ambiguous",
        (None, None, BindingValue::Literal(_)) => "inline literal",
        (None, None, BindingValue::Expression(_)) => "expression",
    };

    let value = match (&binding.value, entry) {
        (_, Some(entry)) => python_literal(&entry.value),
        (BindingValue::Literal(value), None) => python_literal(value),
        (BindingValue::Expression(text), None) => shorten(text),
    };

    ScannedBinding {
        name: binding.name.clone(),
        line: binding.declared_at.line,
        kind,
        value,
        flag: entry.map(|e| e.arg()),
    }
}

/// First line of an expression, cut to a readable width.
fn shorten(text: &str) -> String {
    let first = text.lines().next().unwrap_or_default();
    let multiline = first.len() < text.trim_end().len();
    if first.chars().count() > MAX_EXPRESSION_WIDTH {
        let cut: String = first.chars().take(MAX_EXPRESSION_WIDTH).collect();
        format!("{}...", cut)
    } else if multiline {
        format!("{}...", first)
    } else {
        first.to_string()
    }
}
