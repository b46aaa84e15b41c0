//! Argument-parsing scaffold generation.

use simman_core::ExtractSettings;
use simman_ir::{ConfigurationEntry, FileConfiguration, TypeTag};

use crate::{
    builder::CodeBuilder,
    generation::ImportCollector,
    literal::{python_literal, python_string},
};

/// Header comment that opens every generated scaffold.
pub const SCAFFOLD_MARKER: &str = "Auto-generated argument parsing";

/// Converter for boolean flags; argparse's `bool` treats every non-empty
/// string as true.
const BOOL_CONVERTER: &str = r#"lambda value: value.strip().lower() in ("true", "1", "yes", "y")"#;

/// The `argparse` block inserted into a rewritten script.
///
/// Declares one option per literal entry, in configuration order.
pub struct Scaffold<'a> {
    config: &'a FileConfiguration,
    settings: &'a ExtractSettings,
    existing_imports: &'a [String],
}

impl<'a> Scaffold<'a> {
    pub fn new(config: &'a FileConfiguration, settings: &'a ExtractSettings) -> Self {
        Self {
            config,
            settings,
            existing_imports: &[],
        }
    }

    /// Skip import statements the file already has verbatim.
    pub fn with_existing_imports(mut self, imports: &'a [String]) -> Self {
        self.existing_imports = imports;
        self
    }

    /// The scaffold lines, without line terminators.
    pub fn lines(&self) -> Vec<String> {
        self.render("\n").lines().map(str::to_string).collect()
    }

    /// Render the scaffold, each line terminated by `line_ending`.
    pub fn render(&self, line_ending: &'static str) -> String {
        let parser = &self.settings.parser;
        let namespace = &self.settings.namespace;

        let mut imports = ImportCollector::new();
        imports.add_module("argparse");

        CodeBuilder::python()
            .with_line_ending(line_ending)
            .blank()
            .comment(SCAFFOLD_MARKER)
            .each(imports.lines_excluding(self.existing_imports), |b, import| {
                b.line(&import)
            })
            .line(&format!(
                "{} = argparse.ArgumentParser(description={})",
                parser,
                python_string(&self.settings.description)
            ))
            .each(self.config.literal_entries(), |b, entry| {
                b.line(&add_argument(parser, entry))
            })
            .line(&format!("{} = {}.parse_args()", namespace, parser))
            .blank()
            .build()
    }
}

fn add_argument(parser: &str, entry: &ConfigurationEntry) -> String {
    let converter = match entry.type_tag {
        TypeTag::Bool => BOOL_CONVERTER,
        other => other.as_str(),
    };
    // argparse expands `%` in help strings.
    let help = format!("Default: {}", entry.value).replace('%', "%%");

    format!(
        "{}.add_argument({}, type={}, default={}, help={})",
        parser,
        python_string(&entry.arg()),
        converter,
        python_literal(&entry.value),
        python_string(&help)
    )
}

#[cfg(test)]
mod tests {
    use simman_ir::{Binding, BindingValue, LiteralValue, Position};
    use simman_python::{ExistingScaffold, PythonModule};

    use super::*;

    fn config(entries: &[(&str, LiteralValue)]) -> FileConfiguration {
        let bindings: Vec<Binding> = entries
            .iter()
            .enumerate()
            .map(|(i, (name, value))| Binding {
                name: name.to_string(),
                value: BindingValue::Literal(value.clone()),
                declared_at: Position::new(i + 1, 0),
                value_end: Position::new(i + 1, 12),
                ambiguity: None,
            })
            .collect();
        FileConfiguration::build("sim.py", &bindings, &[], "args").0
    }

    #[test]
    fn test_lines() {
        let config = config(&[
            ("WIDTH", LiteralValue::Int(10)),
            ("DEBUG", LiteralValue::Bool(true)),
        ]);
        let settings = ExtractSettings::default();

        let lines = Scaffold::new(&config, &settings).lines();
        assert_eq!(
            lines,
            vec![
                "",
                "# Auto-generated argument parsing",
                "import argparse",
                "parser = argparse.ArgumentParser(description=\"Configurable script\")",
                "parser.add_argument(\"--width\", type=int, default=10, help=\"Default: 10\")",
                "parser.add_argument(\"--debug\", type=lambda value: value.strip().lower() in (\"true\", \"1\", \"yes\", \"y\"), default=True, help=\"Default: True\")",
                "args = parser.parse_args()",
                "",
            ]
        );
    }

    #[test]
    fn test_skips_existing_import() {
        let config = config(&[("RATE", LiteralValue::Float(0.5))]);
        let settings = ExtractSettings::default();
        let existing = vec!["import argparse".to_string()];

        let lines = Scaffold::new(&config, &settings)
            .with_existing_imports(&existing)
            .lines();
        assert!(!lines.iter().any(|l| l == "import argparse"));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_help_escapes_percent() {
        let config = config(&[("LABEL", LiteralValue::Str("100% \"done\"".into()))]);
        let settings = ExtractSettings::default();

        let lines = Scaffold::new(&config, &settings).lines();
        assert_eq!(
            lines[4],
            r#"parser.add_argument("--label", type=str, default="100% \"done\"", help="Default: 100%% \"done\"")"#
        );
    }

    #[test]
    fn test_custom_identifiers_and_crlf() {
        let config = config(&[("N", LiteralValue::Int(1))]);
        let settings = ExtractSettings {
            parser: "cli".into(),
            namespace: "opts".into(),
            description: "Grid runner".into(),
            ..ExtractSettings::default()
        };

        let text = Scaffold::new(&config, &settings).render("\r\n");
        assert!(text.contains("cli = argparse.ArgumentParser(description=\"Grid runner\")\r\n"));
        assert!(text.contains("opts = cli.parse_args()\r\n"));
        assert!(text.starts_with("\r\n# Auto-generated"));
    }

    #[test]
    fn test_defaults_read_back_with_their_types() {
        let config = config(&[
            ("STEPS", LiteralValue::Int(-3)),
            ("RATE", LiteralValue::Float(0.5)),
            ("LABEL", LiteralValue::Str("it's \"done\"\n".into())),
            ("DEBUG", LiteralValue::Bool(false)),
        ]);
        let settings = ExtractSettings::default();
        let text = Scaffold::new(&config, &settings).render("\n");

        let module = PythonModule::parse(text.as_str(), "sim.py").unwrap();
        let scaffold = ExistingScaffold::detect(&module, "parser", "args").unwrap();
        let recovered: Vec<(&str, TypeTag, &LiteralValue)> = scaffold
            .options
            .iter()
            .map(|o| (o.flag.as_str(), o.type_tag, &o.default))
            .collect();
        let expected: Vec<(&str, TypeTag, &LiteralValue)> = config
            .entries()
            .iter()
            .map(|e| (e.flag_name.as_str(), e.type_tag, &e.value))
            .collect();
        assert_eq!(recovered, expected);
    }

    #[test]
    fn test_bool_converter_words() {
        let words: Vec<&str> = BOOL_CONVERTER.split('"').skip(1).step_by(2).collect();
        assert_eq!(words, vec!["true", "1", "yes", "y"]);

        // Both `str(True)` and the launcher's lower-case form parse as true.
        for accepted in ["True", "true", " YES "] {
            assert!(words.contains(&accepted.trim().to_lowercase().as_str()));
        }
        for rejected in ["False", "false", "0", "no"] {
            assert!(!words.contains(&rejected.trim().to_lowercase().as_str()));
        }
    }
}
