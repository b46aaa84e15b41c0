//! Rendering targets for command reports.

/// Where a report is written.
///
/// Reports say what they contain through these calls; the target decides
/// how it looks.
pub trait Output {
    /// Top-level heading, underlined on a terminal.
    fn heading(&mut self, text: &str);

    /// Heading for a group of items, such as one script.
    fn group(&mut self, name: &str);

    /// A labelled value.
    fn field(&mut self, label: &str, value: &str);

    /// One entry in the current group.
    fn item(&mut self, text: &str);

    /// A problem worth the user's attention. Goes to stderr on a terminal.
    fn warning(&mut self, msg: &str);

    /// The full content a file would be written with.
    fn file_preview(&mut self, path: &str, content: &str);

    /// A free-form line.
    fn text(&mut self, text: &str);

    fn blank(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Plain text on stdout, warnings on stderr.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn heading(&mut self, text: &str) {
        println!("{text}\n{}", "=".repeat(text.chars().count()));
    }

    fn group(&mut self, name: &str) {
        println!("{name}:");
    }

    fn field(&mut self, label: &str, value: &str) {
        println!("{label}: {value}");
    }

    fn item(&mut self, text: &str) {
        println!("  - {text}");
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {msg}");
    }

    fn file_preview(&mut self, path: &str, content: &str) {
        println!("── {path} ──");
        println!("{}", content.trim_end());
    }

    fn text(&mut self, text: &str) {
        println!("{text}");
    }

    fn blank(&mut self) {
        println!();
    }
}

/// Keeps rendered lines in memory so tests can assert on them.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Output for RecordingOutput {
    fn heading(&mut self, text: &str) {
        self.lines.push(format!("# {text}"));
    }

    fn group(&mut self, name: &str) {
        self.lines.push(format!("{name}:"));
    }

    fn field(&mut self, label: &str, value: &str) {
        self.lines.push(format!("{label}: {value}"));
    }

    fn item(&mut self, text: &str) {
        self.lines.push(format!("- {text}"));
    }

    fn warning(&mut self, msg: &str) {
        self.lines.push(format!("warning: {msg}"));
    }

    fn file_preview(&mut self, path: &str, content: &str) {
        self.lines.push(format!("-- {path} --"));
        self.lines.extend(content.trim_end().lines().map(str::to_string));
    }

    fn text(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }
}
