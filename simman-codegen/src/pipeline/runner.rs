//! Pipeline orchestrator.

use std::path::{Path, PathBuf};

use eyre::Result;
use simman_core::{Error, ExtractSettings, GeneratedFile, Settings};
use simman_ir::{FileConfiguration, Manifest};

use super::{
    Diagnostic, DirectoryReport, FileContext, FileStatus, FileSummary, Phase, Plugin, Unchanged,
    phases::{ModelPhase, ParsePhase, ReadPhase, RewritePhase, WritePhase},
};
use crate::launcher::Launcher;

/// The extraction pipeline orchestrator.
///
/// Runs the built-in phases (read, parse, model, rewrite, write) for every
/// candidate file of a directory in name order, then aggregates the
/// manifest and writes the launcher. Plugin hooks are called around each
/// phase and after each file.
///
/// # Example
///
/// ```ignore
/// let report = Pipeline::new().dry_run(true).run(dir, &settings)?;
/// for file in &report.previews {
///     println!("{}", file.path().display());
/// }
/// ```
pub struct Pipeline {
    plugins: Vec<Box<dyn Plugin>>,
    dry_run: bool,
}

impl Pipeline {
    /// Create a new pipeline with the built-in phases.
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
            dry_run: false,
        }
    }

    /// Add a plugin to receive lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Compute everything but write nothing; output is kept as previews.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the pipeline on a directory.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be listed, if a plugin aborts, or if
    /// the launcher cannot be written. Problems with individual files are
    /// reported in the returned [`DirectoryReport`] instead.
    pub fn run(&self, directory: &Path, settings: &Settings) -> Result<DirectoryReport> {
        let extract = &settings.extract;
        let candidates = candidate_files(directory, extract)?;
        tracing::debug!(directory = %directory.display(), files = candidates.len(), "scanning directory");

        let phases: Vec<Box<dyn Phase>> = vec![
            Box::new(ReadPhase),
            Box::new(ParsePhase),
            Box::new(ModelPhase),
            Box::new(RewritePhase),
            Box::new(WritePhase),
        ];

        let mut report = DirectoryReport {
            directory: directory.to_path_buf(),
            files: Vec::new(),
            manifest: Manifest::new(),
            launcher: None,
            previews: Vec::new(),
            dry_run: self.dry_run,
        };

        for (file, path) in candidates {
            let mut ctx = FileContext::new(file, path, self.dry_run);
            let mut failure = None;

            for phase in &phases {
                for plugin in &self.plugins {
                    plugin.on_before_phase(phase.name(), &ctx)?;
                }
                if let Err(err) = phase.run(&mut ctx, extract) {
                    failure = Some((phase.name(), err));
                    break;
                }
                for plugin in &self.plugins {
                    plugin.on_after_phase(phase.name(), &ctx)?;
                }
            }

            if self.dry_run {
                if let Some(rewrite) = ctx.rewrite.as_ref() {
                    report
                        .previews
                        .push(simman_core::File::new(&ctx.path, rewrite.source.as_str()));
                }
            }

            let (summary, config) = summarize(ctx, failure);
            for plugin in &self.plugins {
                plugin.on_file_done(&summary)?;
            }
            if let Some(config) = config {
                report.manifest.insert(config);
            }
            report.files.push(summary);
        }

        if !report.manifest.is_empty() {
            let launcher = Launcher::new(&report.manifest, &extract.launcher);
            let path = launcher.path(directory);
            if self.dry_run {
                report
                    .previews
                    .push(simman_core::File::new(&path, launcher.render()));
            } else {
                launcher.write(directory)?;
                tracing::info!(path = %path.display(), "wrote launcher");
                report.launcher = Some(path);
            }
        }

        Ok(report)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the pipeline without plugins.
pub fn process_directory(directory: &Path, settings: &Settings) -> Result<DirectoryReport> {
    Pipeline::new().run(directory, settings)
}

/// Candidate files of a directory as `(name, path)`, sorted by name.
fn candidate_files(
    directory: &Path,
    settings: &ExtractSettings,
) -> simman_core::Result<Vec<(String, PathBuf)>> {
    if !directory.exists() {
        return Err(Box::new(Error::DirectoryNotFound {
            path: directory.to_path_buf(),
        }));
    }
    if !directory.is_dir() {
        return Err(Box::new(Error::NotADirectory {
            path: directory.to_path_buf(),
        }));
    }

    let entries = std::fs::read_dir(directory).map_err(|e| Error::io(directory, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(directory, e))?;
        let path = entry.path();
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if path.is_file() && settings.is_candidate(&name) {
            files.push((name, path));
        }
    }
    files.sort();
    Ok(files)
}

/// Turn a finished context into its summary and manifest contribution.
fn summarize(
    mut ctx: FileContext,
    failure: Option<(&'static str, Box<Error>)>,
) -> (FileSummary, Option<FileConfiguration>) {
    let (status, config) = match failure {
        None => {
            let status = if ctx.written || (ctx.dry_run && ctx.rewrite.is_some()) {
                FileStatus::Modified
            } else if ctx.scaffold.is_some() {
                FileStatus::Unchanged(Unchanged::AlreadyScaffolded)
            } else {
                FileStatus::Unchanged(Unchanged::NothingToRewrite)
            };
            (status, ctx.config.take())
        }
        Some((phase, err)) => {
            let unchanged = match *err {
                Error::ScaffoldConflict { .. } => Some(Unchanged::Conflict),
                Error::Drift { .. } | Error::ReparseMismatch { .. } => Some(Unchanged::Aborted),
                _ => None,
            };
            match unchanged {
                Some(reason) => {
                    tracing::warn!(file = %ctx.file, error = %err, "left file unchanged");
                    ctx.diagnostics
                        .push(Diagnostic::warning(phase, err.to_string()).at(&ctx.file));
                    (
                        FileStatus::Unchanged(reason),
                        Some(FileConfiguration::new(&ctx.file)),
                    )
                }
                None => {
                    tracing::warn!(file = %ctx.file, error = %err, "skipped file");
                    ctx.diagnostics
                        .push(Diagnostic::error(phase, err.to_string()).at(&ctx.file));
                    (FileStatus::Skipped(err.to_string()), None)
                }
            }
        }
    };

    let summary = FileSummary {
        file: ctx.file,
        bindings_found: ctx.bindings.len(),
        configurable: config.as_ref().map_or(0, FileConfiguration::len),
        status,
        diagnostics: ctx.diagnostics,
    };
    (summary, config)
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use tempfile::TempDir;

    use super::*;

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
        done_count: Arc<AtomicUsize>,
    }

    impl CountingPlugin {
        fn new() -> (Self, [Arc<AtomicUsize>; 3]) {
            let counts = [
                Arc::new(AtomicUsize::new(0)),
                Arc::new(AtomicUsize::new(0)),
                Arc::new(AtomicUsize::new(0)),
            ];
            (
                Self {
                    before_count: counts[0].clone(),
                    after_count: counts[1].clone(),
                    done_count: counts[2].clone(),
                },
                counts,
            )
        }
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &FileContext) -> Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &FileContext) -> Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_file_done(&self, _summary: &FileSummary) -> Result<()> {
            self.done_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.py", "WIDTH = 10\n");
        write(temp.path(), "b.py", "def broken(:\n");
        let (plugin, [before, after, done]) = CountingPlugin::new();

        let report = Pipeline::new()
            .plugin(plugin)
            .run(temp.path(), &Settings::default())
            .unwrap();

        assert_eq!(report.files.len(), 2);
        // a.py runs all five phases; b.py stops in parse.
        assert_eq!(before.load(Ordering::SeqCst), 5 + 2);
        assert_eq!(after.load(Ordering::SeqCst), 5 + 1);
        assert_eq!(done.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_candidates_sorted_and_filtered() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "zeta.py", "A = 1\n");
        write(temp.path(), "alpha.py", "B = 2\n");
        write(temp.path(), "manager.py", "C = 3\n");
        write(temp.path(), "notes.txt", "D = 4\n");
        std::fs::create_dir(temp.path().join("pkg.py")).unwrap();

        let files = candidate_files(temp.path(), &ExtractSettings::default()).unwrap();
        let names: Vec<&str> = files.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["alpha.py", "zeta.py"]);
    }

    #[test]
    fn test_missing_directory() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = candidate_files(&missing, &ExtractSettings::default()).unwrap_err();
        assert!(matches!(*err, Error::DirectoryNotFound { .. }));

        let file = temp.path().join("file.py");
        write(temp.path(), "file.py", "");
        let err = candidate_files(&file, &ExtractSettings::default()).unwrap_err();
        assert!(matches!(*err, Error::NotADirectory { .. }));
    }

    #[test]
    fn test_dry_run_collects_previews() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "grid.py", "WIDTH = 10\n");

        let report = Pipeline::new()
            .dry_run(true)
            .run(temp.path(), &Settings::default())
            .unwrap();

        assert!(report.files[0].status.is_modified());
        assert_eq!(report.previews.len(), 2);
        assert!(report.launcher.is_none());
        assert!(!temp.path().join("manager.py").exists());
        assert_eq!(
            std::fs::read_to_string(temp.path().join("grid.py")).unwrap(),
            "WIDTH = 10\n"
        );
    }

    #[test]
    fn test_no_parsed_files_writes_no_launcher() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "bad.py", "x = (\n");

        let report = process_directory(temp.path(), &Settings::default()).unwrap();
        assert!(report.files[0].status.is_skipped());
        assert!(report.manifest.is_empty());
        assert!(report.launcher.is_none());
        assert!(!temp.path().join("manager.py").exists());
    }
}
