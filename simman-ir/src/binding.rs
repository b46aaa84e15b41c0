//! Module-level bindings discovered by the classifier.

use crate::{LiteralValue, TypeTag};

/// A location in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 0-based byte column.
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Whether a binding's value is known statically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// The value was evaluated statically and may be externalized.
    Literal,
    /// The value depends on runtime computation and stays inline.
    Expression,
}

/// The right-hand side of a binding.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingValue {
    Literal(LiteralValue),
    /// Verbatim source text of the expression, for display only.
    Expression(String),
}

/// Why a binding was degraded to an expression even though it may look literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ambiguity {
    /// The name is bound `count` times at module scope.
    Rebound { count: usize },
    /// The statement shares a physical line with another statement.
    SharedLine,
}

impl std::fmt::Display for Ambiguity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ambiguity::Rebound { count } => write!(f, "bound {} times at module scope", count),
            Ambiguity::SharedLine => f.write_str("shares its line with another statement"),
        }
    }
}

/// A single-name assignment directly in a module's outermost scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The assigned identifier.
    pub name: String,
    /// The classified right-hand side.
    pub value: BindingValue,
    /// Start of the assignment statement.
    pub declared_at: Position,
    /// End of the right-hand side (before any trailing comment).
    pub value_end: Position,
    /// Set when the binding was degraded because its meaning is ambiguous.
    pub ambiguity: Option<Ambiguity>,
}

impl Binding {
    pub fn kind(&self) -> BindingKind {
        match self.value {
            BindingValue::Literal(_) => BindingKind::Literal,
            BindingValue::Expression(_) => BindingKind::Expression,
        }
    }

    /// The literal value, if the binding is a literal.
    pub fn literal(&self) -> Option<&LiteralValue> {
        match &self.value {
            BindingValue::Literal(value) => Some(value),
            BindingValue::Expression(_) => None,
        }
    }

    /// Last line covered by the statement's value.
    pub fn end_line(&self) -> usize {
        self.value_end.line
    }

    /// If the value is `<namespace>.<dest>`, return `dest`.
    ///
    /// This is the shape left behind by a previous rewrite.
    pub fn reads_namespace(&self, namespace: &str) -> Option<&str> {
        let BindingValue::Expression(text) = &self.value else {
            return None;
        };
        let dest = text.trim().strip_prefix(namespace)?.strip_prefix('.')?;
        simman_core::is_identifier(dest).then_some(dest)
    }
}

/// An option recovered from an existing argument-parsing scaffold.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldOption {
    /// Flag name without the leading `--`.
    pub flag: String,
    /// Attribute the parsed value is stored under.
    pub dest: String,
    pub type_tag: TypeTag,
    pub default: LiteralValue,
    /// Line of the `add_argument` call.
    pub line: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expression(name: &str, text: &str) -> Binding {
        Binding {
            name: name.to_string(),
            value: BindingValue::Expression(text.to_string()),
            declared_at: Position::new(1, 0),
            value_end: Position::new(1, name.len() + 3 + text.len()),
            ambiguity: None,
        }
    }

    #[test]
    fn test_kind() {
        let mut binding = expression("HEIGHT", "WIDTH * 2");
        assert_eq!(binding.kind(), BindingKind::Expression);
        assert!(binding.literal().is_none());

        binding.value = BindingValue::Literal(LiteralValue::Int(2));
        assert_eq!(binding.kind(), BindingKind::Literal);
    }

    #[test]
    fn test_reads_namespace() {
        assert_eq!(
            expression("MAX_SPEED", "args.max_speed").reads_namespace("args"),
            Some("max_speed")
        );
        assert_eq!(expression("X", "args.x.y").reads_namespace("args"), None);
        assert_eq!(expression("X", "argsx.y").reads_namespace("args"), None);
        assert_eq!(expression("X", "opts.x").reads_namespace("args"), None);
    }

    #[test]
    fn test_ambiguity_display() {
        assert_eq!(
            Ambiguity::Rebound { count: 2 }.to_string(),
            "bound 2 times at module scope"
        );
    }
}
