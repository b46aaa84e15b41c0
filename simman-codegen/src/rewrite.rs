//! In-place rewriting of literal bindings.

use simman_core::{Error, ExtractSettings, Result};
use simman_ir::{Binding, ConfigurationEntry, FileConfiguration};
use simman_python::{Layout, PythonModule, classify};

use crate::scaffold::Scaffold;

/// The rewritten text of a file.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewrite {
    pub source: String,
    /// Number of lines inserted by the scaffold.
    pub offset: usize,
    /// Names now read from the parsed arguments.
    pub rewritten: Vec<String>,
}

/// Rewrites literal bindings to read from an inserted argument scaffold.
pub struct Rewriter<'a> {
    settings: &'a ExtractSettings,
}

impl<'a> Rewriter<'a> {
    pub fn new(settings: &'a ExtractSettings) -> Self {
        Self { settings }
    }

    /// Rewrite the literal entries of `config` in the module's source.
    ///
    /// Returns `None` when there is nothing to rewrite. The result is
    /// re-parsed and re-classified before it is returned; any disagreement
    /// aborts the file.
    pub fn rewrite(
        &self,
        module: &PythonModule,
        bindings: &[Binding],
        layout: &Layout,
        config: &FileConfiguration,
    ) -> Result<Option<Rewrite>> {
        if !config.has_literal_entries() {
            return Ok(None);
        }

        let newline = layout.newline.as_str();
        let scaffold = Scaffold::new(config, self.settings)
            .with_existing_imports(&layout.imports)
            .render(newline);

        let mut lines: Vec<String> = module
            .source()
            .split_inclusive('\n')
            .map(str::to_string)
            .collect();

        let insert_row = layout.insert_row.min(lines.len());
        if let Some(previous) = insert_row
            .checked_sub(1)
            .and_then(|row| lines.get_mut(row))
            .filter(|line| !line.ends_with('\n'))
        {
            previous.push_str(newline);
        }

        let inserted: Vec<String> = scaffold.split_inclusive('\n').map(str::to_string).collect();
        let offset = inserted.len();
        let tail = lines.split_off(insert_row);
        lines.extend(inserted);
        lines.extend(tail);

        let entries: Vec<&ConfigurationEntry> = config.literal_entries().collect();
        for entry in entries.iter().rev() {
            self.rewrite_entry(&mut lines, entry, offset)?;
        }

        let rewrite = Rewrite {
            source: lines.concat(),
            offset,
            rewritten: entries.iter().map(|e| e.name.clone()).collect(),
        };
        self.verify(&rewrite, bindings, layout.insert_row, config)?;

        tracing::debug!(
            file = config.file(),
            offset,
            rewritten = rewrite.rewritten.len(),
            "rewrote literal bindings"
        );
        Ok(Some(rewrite))
    }

    fn rewrite_entry(
        &self,
        lines: &mut [String],
        entry: &ConfigurationEntry,
        offset: usize,
    ) -> Result<()> {
        let drift = || {
            Box::new(Error::Drift {
                name: entry.name.clone(),
                line: entry.declared_at.line,
            })
        };

        let start = entry.declared_at.line - 1 + offset;
        let end = entry.end_line() - 1 + offset;
        if end >= lines.len() || end < start {
            return Err(drift());
        }

        let first = &lines[start];
        let body = first.trim_start();
        let indent = &first[..first.len() - body.len()];
        let assigns = body
            .strip_prefix(entry.name.as_str())
            .is_some_and(|rest| rest.trim_start().starts_with('='));
        if !assigns {
            return Err(drift());
        }
        let indent = indent.to_string();

        let last = &lines[end];
        let terminator = line_terminator(last);
        let trailing = last[..last.len() - terminator.len()]
            .get(entry.value_end.column..)
            .ok_or_else(drift)?
            .to_string();

        lines[start] = format!(
            "{}{} = {}.{}{}{}",
            indent,
            entry.name,
            self.settings.namespace,
            entry.dest(),
            trailing,
            terminator
        );
        // Keep the line count so later rows keep their offset.
        for line in &mut lines[start + 1..=end] {
            let terminator = line_terminator(line).to_string();
            *line = terminator;
        }

        Ok(())
    }

    fn verify(
        &self,
        rewrite: &Rewrite,
        original: &[Binding],
        insert_row: usize,
        config: &FileConfiguration,
    ) -> Result<()> {
        let mismatch = |reason: String| Box::new(Error::ReparseMismatch { reason });

        let module = PythonModule::parse(rewrite.source.as_str(), config.file())
            .map_err(|e| mismatch(format!("does not parse: {}", e)))?;
        let reclassified = classify(&module);
        let find = |name: &str| reclassified.iter().find(|b| b.name == name);

        for name in &rewrite.rewritten {
            let entry = config.get(name).ok_or_else(|| mismatch(format!("lost '{}'", name)))?;
            let dest = entry.dest();
            let reads = find(name)
                .and_then(|b| b.reads_namespace(&self.settings.namespace))
                .is_some_and(|d| d == dest);
            if !reads {
                return Err(mismatch(format!(
                    "'{}' does not read {}.{}",
                    name, self.settings.namespace, dest
                )));
            }
        }

        for binding in original
            .iter()
            .filter(|b| !rewrite.rewritten.contains(&b.name))
        {
            let expected_line = if binding.declared_at.line > insert_row {
                binding.declared_at.line + rewrite.offset
            } else {
                binding.declared_at.line
            };
            let unchanged = find(&binding.name).is_some_and(|b| {
                b.value == binding.value
                    && b.ambiguity == binding.ambiguity
                    && b.declared_at.line == expected_line
            });
            if !unchanged {
                return Err(mismatch(format!("changed the binding of '{}'", binding.name)));
            }
        }

        Ok(())
    }
}

fn line_terminator(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}
