//! The optional `simman.toml` settings file.

use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result, naming::is_identifier};

/// Name of the settings file looked up in the processed directory.
pub const SETTINGS_FILE: &str = "simman.toml";

/// Root of `simman.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Extraction settings (`[extract]` table).
    #[serde(default)]
    pub extract: ExtractSettings,
}

/// Settings for the `extract` run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractSettings {
    /// Extension of the files to process, without the dot.
    pub extension: String,
    /// File name of the generated launcher. Never processed as a source file.
    pub launcher: String,
    /// File names to leave alone.
    pub exclude: Vec<String>,
    /// Identifier bound to the `argparse.ArgumentParser` in rewritten files.
    pub parser: String,
    /// Identifier bound to the parsed-arguments namespace in rewritten files.
    pub namespace: String,
    /// Description passed to the argument parser.
    pub description: String,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            extension: "py".to_string(),
            launcher: "manager.py".to_string(),
            exclude: Vec::new(),
            parser: "parser".to_string(),
            namespace: "args".to_string(),
            description: "Configurable script".to_string(),
        }
    }
}

impl ExtractSettings {
    /// Whether a file name in the processed directory should be extracted.
    pub fn is_candidate(&self, file_name: &str) -> bool {
        let matches_extension = Path::new(file_name)
            .extension()
            .is_some_and(|ext| ext == self.extension.as_str());

        matches_extension
            && file_name != self.launcher
            && !self.exclude.iter().any(|e| e == file_name)
    }
}

impl Settings {
    /// Load `simman.toml` from a directory, falling back to defaults when absent.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(SETTINGS_FILE);
        if path.is_file() {
            Self::open(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Open and parse a settings file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let settings = Self::from_str_with_filename(&content, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Parse settings from a string with a filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(content).map_err(|e| Error::settings(e, content, filename))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate values that serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        let extract = &self.extract;

        for (key, value) in [
            ("extract.parser", &extract.parser),
            ("extract.namespace", &extract.namespace),
        ] {
            if !is_identifier(value) {
                return Err(Error::invalid_setting(
                    key,
                    format!("'{}' is not a valid Python identifier", value),
                ));
            }
        }

        if extract.parser == extract.namespace {
            return Err(Error::invalid_setting(
                "extract.namespace",
                "must differ from extract.parser",
            ));
        }

        if extract.extension.is_empty() || extract.extension.starts_with('.') {
            return Err(Error::invalid_setting(
                "extract.extension",
                "expected an extension without the leading dot, e.g. \"py\"",
            ));
        }

        if extract.launcher.is_empty() || extract.launcher.contains(['/', '\\']) {
            return Err(Error::invalid_setting(
                "extract.launcher",
                "expected a plain file name",
            ));
        }

        Ok(())
    }
}
