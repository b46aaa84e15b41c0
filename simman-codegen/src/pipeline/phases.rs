//! Built-in pipeline phases.

use simman_core::{Error, ExtractSettings, File, Result};
use simman_ir::{EntryOrigin, FileConfiguration};
use simman_python::{ExistingScaffold, Layout, PythonModule, bound_names, classify};

use super::{Diagnostic, FileContext, Phase};
use crate::rewrite::Rewriter;

/// Reads the file as UTF-8.
pub struct ReadPhase;

impl Phase for ReadPhase {
    fn name(&self) -> &'static str {
        "read"
    }

    fn run(&self, ctx: &mut FileContext, _settings: &ExtractSettings) -> Result<()> {
        let source = std::fs::read_to_string(&ctx.path).map_err(|e| Error::io(&ctx.path, e))?;
        ctx.source = Some(source);
        Ok(())
    }
}

/// Parses the module, classifies its bindings and inspects its layout.
pub struct ParsePhase;

impl Phase for ParsePhase {
    fn name(&self) -> &'static str {
        "parse"
    }

    fn run(&self, ctx: &mut FileContext, settings: &ExtractSettings) -> Result<()> {
        let Some(source) = ctx.source.take() else {
            return Ok(());
        };
        let module = PythonModule::parse(source, &ctx.file)?;

        ctx.bindings = classify(&module);
        ctx.layout = Some(Layout::of(&module));
        ctx.scaffold = ExistingScaffold::detect(&module, &settings.parser, &settings.namespace);

        if ctx.scaffold.is_none() {
            let names = bound_names(&module);
            for reserved in [&settings.parser, &settings.namespace] {
                if names.contains_key(reserved.as_str()) {
                    let line = ctx
                        .bindings
                        .iter()
                        .find(|b| &b.name == reserved)
                        .map_or(0, |b| b.declared_at.line);
                    return Err(Box::new(Error::ScaffoldConflict {
                        name: reserved.clone(),
                        line,
                    }));
                }
            }
        }

        tracing::debug!(
            file = %ctx.file,
            bindings = ctx.bindings.len(),
            scaffolded = ctx.scaffold.is_some(),
            "parsed module"
        );
        ctx.module = Some(module);
        Ok(())
    }
}

/// Builds the file configuration and reports rejected bindings.
pub struct ModelPhase;

impl Phase for ModelPhase {
    fn name(&self) -> &'static str {
        "model"
    }

    fn run(&self, ctx: &mut FileContext, settings: &ExtractSettings) -> Result<()> {
        if ctx.module.is_none() {
            return Ok(());
        }
        let options = ctx
            .scaffold
            .as_ref()
            .map(|s| s.options.as_slice())
            .unwrap_or_default();
        let (mut config, rejections) =
            FileConfiguration::build(&ctx.file, &ctx.bindings, options, &settings.namespace);

        for rejection in rejections.iter().filter(|r| r.is_notable()) {
            ctx.diagnostics.push(
                Diagnostic::warning(self.name(), format!("'{}': {}", rejection.name, rejection.reason))
                    .at_line(&ctx.file, rejection.line),
            );
        }

        if ctx.scaffold.is_some() {
            for entry in config.literal_entries() {
                ctx.diagnostics.push(
                    Diagnostic::info(
                        self.name(),
                        format!("'{}' left inline; the file already has a scaffold", entry.name),
                    )
                    .at_line(&ctx.file, entry.declared_at.line),
                );
            }
            config.retain_origin(EntryOrigin::Scaffold);
        }

        ctx.config = Some(config);
        Ok(())
    }
}

/// Generates the scaffold and rewrites literal bindings in memory.
pub struct RewritePhase;

impl Phase for RewritePhase {
    fn name(&self) -> &'static str {
        "rewrite"
    }

    fn run(&self, ctx: &mut FileContext, settings: &ExtractSettings) -> Result<()> {
        let (Some(module), Some(layout), Some(config)) =
            (ctx.module.as_ref(), ctx.layout.as_ref(), ctx.config.as_ref())
        else {
            return Ok(());
        };
        if ctx.scaffold.is_some() {
            return Ok(());
        }

        ctx.rewrite = Rewriter::new(settings).rewrite(module, &ctx.bindings, layout, config)?;
        Ok(())
    }
}

/// Writes the rewritten text back over the original file.
pub struct WritePhase;

impl Phase for WritePhase {
    fn name(&self) -> &'static str {
        "write"
    }

    fn run(&self, ctx: &mut FileContext, _settings: &ExtractSettings) -> Result<()> {
        let Some(rewrite) = ctx.rewrite.as_ref() else {
            return Ok(());
        };
        if ctx.dry_run {
            return Ok(());
        }

        File::new(&ctx.path, rewrite.source.as_str()).write()?;
        ctx.written = true;
        tracing::info!(file = %ctx.file, "rewrote file");
        Ok(())
    }
}
