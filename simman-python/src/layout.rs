//! Module layout: scaffold insertion point, imports and newline style.

use crate::PythonModule;

const IMPORT_KINDS: &[&str] = &[
    "import_statement",
    "import_from_statement",
    "future_import_statement",
];

/// Line terminator used by a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Newline {
    #[default]
    Lf,
    CrLf,
}

impl Newline {
    /// Detect the terminator of the first line.
    pub fn detect(source: &str) -> Self {
        match source.find('\n') {
            Some(i) if source[..i].ends_with('\r') => Newline::CrLf,
            _ => Newline::Lf,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
        }
    }
}

/// Structural facts about a module the rewriter needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// 0-based line index at which a scaffold is inserted.
    pub insert_row: usize,
    /// Verbatim text of the top-level imports that end before `insert_row`.
    pub imports: Vec<String>,
    pub newline: Newline,
}

impl Layout {
    pub fn of(module: &PythonModule) -> Self {
        let statements = module.statements();
        let mut rest = statements.as_slice();

        let mut docstring_end = None;
        if let Some((first, tail)) = rest.split_first().filter(|(first, _)| is_docstring(**first)) {
            docstring_end = Some(first.end_position().row);
            rest = tail;
        }

        let last_import_end = rest
            .iter()
            .take_while(|node| IMPORT_KINDS.contains(&node.kind()))
            .last()
            .map(|node| node.end_position().row);

        let insert_row = match last_import_end.or(docstring_end) {
            Some(row) => row + 1,
            None => directive_lines(module.source()),
        };

        let imports = statements
            .iter()
            .filter(|node| IMPORT_KINDS.contains(&node.kind()))
            .filter(|node| node.end_position().row < insert_row)
            .filter_map(|node| module.text(*node))
            .map(str::to_string)
            .collect();

        Self {
            insert_row,
            imports,
            newline: Newline::detect(module.source()),
        }
    }

    /// Whether this exact import statement is in effect at `insert_row`.
    pub fn has_import(&self, statement: &str) -> bool {
        self.imports.iter().any(|import| import == statement)
    }
}

fn is_docstring(node: tree_sitter::Node<'_>) -> bool {
    if node.kind() != "expression_statement" || node.named_child_count() != 1 {
        return false;
    }
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .next()
        .is_some_and(|child| matches!(child.kind(), "string" | "concatenated_string"))
}

/// Number of leading interpreter and encoding lines.
fn directive_lines(source: &str) -> usize {
    let mut count = 0;
    for (index, line) in source.lines().take(2).enumerate() {
        let is_shebang = index == 0 && line.starts_with("#!");
        let is_coding = line.trim_start().starts_with('#')
            && (line.contains("coding:") || line.contains("coding="));
        if is_shebang || is_coding {
            count = index + 1;
        } else {
            break;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(source: &str) -> Layout {
        Layout::of(&PythonModule::parse(source, "test.py").unwrap())
    }

    #[test]
    fn test_after_imports() {
        let layout = layout("import math\n# helpers\nfrom os import path\n\nWIDTH = 10\n");
        assert_eq!(layout.insert_row, 3);
        assert_eq!(layout.imports, vec!["import math", "from os import path"]);
    }

    #[test]
    fn test_after_docstring_and_imports() {
        let layout = layout("\"\"\"Grid.\n\nMore.\n\"\"\"\nimport math\nWIDTH = 10\n");
        assert_eq!(layout.insert_row, 5);
    }

    #[test]
    fn test_only_leading_imports_count() {
        let layout = layout("import math\nWIDTH = 10\nimport random\n");
        assert_eq!(layout.insert_row, 1);
        assert!(layout.has_import("import math"));
        assert!(!layout.has_import("import random"));
    }

    #[test]
    fn test_later_import_is_not_in_effect() {
        let layout = layout("import math\nWIDTH = 10\nimport argparse\nprint(WIDTH)\n");
        assert_eq!(layout.imports, vec!["import math"]);
        assert!(!layout.has_import("import argparse"));
    }

    #[test]
    fn test_after_docstring_without_imports() {
        assert_eq!(layout("'''Doc.'''\nWIDTH = 10\n").insert_row, 1);
    }

    #[test]
    fn test_after_directives() {
        let source = "#!/usr/bin/env python3\n# -*- coding: utf-8 -*-\nWIDTH = 10\n";
        assert_eq!(layout(source).insert_row, 2);
        assert_eq!(layout("WIDTH = 10\n").insert_row, 0);
    }

    #[test]
    fn test_future_import() {
        let layout = layout("from __future__ import annotations\nWIDTH = 10\n");
        assert_eq!(layout.insert_row, 1);
    }

    #[test]
    fn test_newline() {
        assert_eq!(Newline::detect("a = 1\r\nb = 2\r\n"), Newline::CrLf);
        assert_eq!(Newline::detect("a = 1\nb = 2\n"), Newline::Lf);
        assert_eq!(Newline::detect("a = 1"), Newline::Lf);
    }
}
