use std::path::{Path, PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for simman operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("directory '{path}' does not exist")]
    #[diagnostic(code(simman::directory_not_found))]
    DirectoryNotFound { path: PathBuf },

    #[error("'{path}' is not a directory")]
    #[diagnostic(code(simman::not_a_directory))]
    NotADirectory { path: PathBuf },

    #[error("failed to access '{path}'")]
    #[diagnostic(code(simman::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    #[diagnostic(
        code(simman::parse_error),
        help("the file is skipped until it parses as Python")
    )]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("failed to parse settings file")]
    #[diagnostic(code(simman::settings))]
    Settings {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid setting '{key}': {reason}")]
    #[diagnostic(code(simman::invalid_setting))]
    InvalidSetting { key: String, reason: String },

    #[error("'{name}' is already bound at module scope (line {line})")]
    #[diagnostic(
        code(simman::scaffold_conflict),
        help("rename the variable or choose another `parser`/`namespace` in simman.toml")
    )]
    ScaffoldConflict { name: String, line: usize },

    #[error("line {line} no longer holds the assignment to '{name}'")]
    #[diagnostic(code(simman::drift))]
    Drift { name: String, line: usize },

    #[error("rewritten source {reason}")]
    #[diagnostic(code(simman::reparse_mismatch))]
    ReparseMismatch { reason: String },
}

impl Error {
    /// Create an I/O error for the given path
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// Create a parse error with source context
    pub fn parse(
        message: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            message: message.into(),
        })
    }

    /// Create a settings parse error from a toml error
    pub fn settings(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Settings {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create an invalid setting error
    pub fn invalid_setting(key: impl Into<String>, reason: impl Into<String>) -> Box<Self> {
        Box::new(Error::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        })
    }
}
