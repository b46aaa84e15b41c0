//! Line-oriented builder for generated Python.

/// Chained builder for module-level Python text.
///
/// Everything simman generates lives at column zero: the scaffold is
/// spliced between top-level statements, and the launcher's function
/// bodies are emitted as one raw block. Lines are terminated with the
/// builder's line ending so inserted text matches its host file.
///
/// # Example
///
/// ```
/// use simman_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::python()
///     .comment("settings")
///     .each(["WIDTH = 10", "HEIGHT = 20"], |b, line| b.line(line))
///     .build();
///
/// assert_eq!(code, "# settings\nWIDTH = 10\nHEIGHT = 20\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    line_ending: &'static str,
    buffer: String,
}

impl CodeBuilder {
    /// A builder that ends lines with `\n`.
    pub fn python() -> Self {
        Self {
            line_ending: "\n",
            buffer: String::new(),
        }
    }

    /// End lines with `line_ending` instead, e.g. `"\r\n"` for CRLF files.
    pub fn with_line_ending(mut self, line_ending: &'static str) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn line(mut self, text: &str) -> Self {
        self.buffer.push_str(text);
        self.buffer.push_str(self.line_ending);
        self
    }

    pub fn blank(mut self) -> Self {
        self.buffer.push_str(self.line_ending);
        self
    }

    pub fn comment(self, text: &str) -> Self {
        self.line(&format!("# {}", text))
    }

    /// Append text verbatim; the caller owns its line endings.
    pub fn raw(mut self, text: &str) -> Self {
        self.buffer.push_str(text);
        self
    }

    /// Fold every item into the builder.
    pub fn each<T, I, F>(self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        items.into_iter().fold(self, f)
    }

    pub fn build(self) -> String {
        self.buffer
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::python()
    }
}
