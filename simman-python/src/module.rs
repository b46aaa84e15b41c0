//! Parsed Python modules.

use miette::SourceSpan;
use simman_core::{Error, Result};
use tree_sitter::{Node, Parser, Tree};

/// A Python source file parsed without syntax errors.
pub struct PythonModule {
    source: String,
    tree: Tree,
}

impl std::fmt::Debug for PythonModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PythonModule")
            .field("len", &self.source.len())
            .finish_non_exhaustive()
    }
}

impl PythonModule {
    /// Parse Python source.
    ///
    /// Fails with [`Error::Parse`] if the tree contains an error or missing
    /// node; the span points at the first one.
    pub fn parse(source: impl Into<String>, filename: &str) -> Result<Self> {
        let source = source.into();

        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| Error::parse(e.to_string(), &source, filename, None))?;

        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| Error::parse("parser gave up", &source, filename, None))?;

        if tree.root_node().has_error() {
            let (message, span) = match first_error(tree.root_node()) {
                Some(node) => {
                    let line = node.start_position().row + 1;
                    let message = if node.is_missing() {
                        format!("missing `{}` at line {}", node.kind(), line)
                    } else {
                        format!("syntax error at line {}", line)
                    };
                    let len = node.end_byte().saturating_sub(node.start_byte());
                    (message, Some(SourceSpan::from((node.start_byte(), len))))
                }
                None => ("syntax error".to_string(), None),
            };
            return Err(Error::parse(message, &source, filename, span));
        }

        Ok(Self { source, tree })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Top-level statements in source order, comments excluded.
    pub fn statements(&self) -> Vec<Node<'_>> {
        let root = self.root();
        let mut cursor = root.walk();
        root.named_children(&mut cursor)
            .filter(|node| node.kind() != "comment")
            .collect()
    }

    /// Source text of a node.
    pub fn text(&self, node: Node<'_>) -> Option<&str> {
        node.utf8_text(self.source.as_bytes()).ok()
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let module = PythonModule::parse("import math\n\nWIDTH = 10  # cells\n", "grid.py").unwrap();
        let kinds: Vec<&str> = module.statements().iter().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec!["import_statement", "expression_statement"]);
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = PythonModule::parse("WIDTH = (10\nHEIGHT = 2\n", "broken.py").unwrap_err();
        match *err {
            Error::Parse { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_message_names_a_line() {
        let err = PythonModule::parse("def f(:\n    pass\n", "broken.py").unwrap_err();
        assert!(err.to_string().contains("line"), "{}", err);
    }
}
