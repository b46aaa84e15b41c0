//! Diagnostics collected while processing a directory.
//!
//! Per-file problems never abort a directory run; they are attached to the
//! file's summary and shown in the final report.

use std::fmt;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Extra detail, e.g. a literal left inline in a scaffolded file.
    Info,
    /// The file was processed, but something was left alone.
    Warning,
    /// The file could not be processed.
    Error,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        *self == Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// A script, optionally narrowed to one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: String,
    /// 1-based line.
    pub line: Option<usize>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.file, line),
            None => f.write_str(&self.file),
        }
    }
}

/// A message from one pipeline phase about one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Name of the phase that reported it.
    pub phase: &'static str,
    pub message: String,
    pub location: Option<Location>,
}

impl Diagnostic {
    pub fn error(phase: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, phase, message)
    }

    pub fn warning(phase: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, phase, message)
    }

    pub fn info(phase: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, phase, message)
    }

    fn new(severity: Severity, phase: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity,
            phase,
            message: message.into(),
            location: None,
        }
    }

    /// Point at a whole file.
    pub fn at(mut self, file: impl Into<String>) -> Self {
        self.location = Some(Location {
            file: file.into(),
            line: None,
        });
        self
    }

    /// Point at a line of a file.
    pub fn at_line(mut self, file: impl Into<String>, line: usize) -> Self {
        self.location = Some(Location {
            file: file.into(),
            line: Some(line),
        });
        self
    }
}

/// `warning[model]: message (grid.py:7)`
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.phase, self.message)?;
        if let Some(location) = &self.location {
            write!(f, " ({})", location)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_without_location() {
        let diag = Diagnostic::error("parse", "syntax error at line 2");
        assert!(diag.severity.is_error());
        assert!(diag.location.is_none());
        assert_eq!(diag.to_string(), "error[parse]: syntax error at line 2");
    }

    #[test]
    fn test_line_location() {
        let diag = Diagnostic::warning("model", "collection literal kept inline").at_line("grid.py", 7);
        assert_eq!(diag.location.as_ref().map(ToString::to_string).as_deref(), Some("grid.py:7"));
        assert_eq!(
            diag.to_string(),
            "warning[model]: collection literal kept inline (grid.py:7)"
        );
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert_eq!(Severity::Info.to_string(), "info");
    }
}
