//! Literal classification of module-level bindings.

use std::collections::{HashMap, HashSet};

use simman_ir::{Ambiguity, Binding, BindingValue, Position, UNRENDERABLE_SENTINEL};
use tree_sitter::Node;

use crate::{PythonModule, literal::evaluate};

/// Compound statements whose bodies still run at module scope.
const MODULE_SCOPE_BLOCKS: &[&str] = &[
    "if_statement",
    "for_statement",
    "while_statement",
    "try_statement",
    "with_statement",
];

/// Classify every single-name assignment in the module's outermost scope.
///
/// Names bound more than once at module scope keep only their first binding,
/// degraded to an expression. Private names (leading `_`) are skipped.
pub fn classify(module: &PythonModule) -> Vec<Binding> {
    let counts = bound_names(module);
    let statements = module.statements();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut bindings = Vec::new();

    for (index, statement) in statements.iter().enumerate() {
        let Some(assignment) = single_assignment(*statement) else {
            continue;
        };
        let (Some(left), Some(right)) = (
            assignment.child_by_field_name("left"),
            assignment.child_by_field_name("right"),
        ) else {
            continue;
        };
        if left.kind() != "identifier"
            || assignment.child_by_field_name("type").is_some()
            || right.kind() == "assignment"
        {
            continue;
        }
        let Some(name) = module.text(left) else {
            continue;
        };
        if simman_core::is_private(name) || !seen.insert(name) {
            continue;
        }

        let ambiguity = match counts.get(name).copied().unwrap_or(1) {
            count if count > 1 => Some(Ambiguity::Rebound { count }),
            _ if shares_line(&statements, index) => Some(Ambiguity::SharedLine),
            _ => None,
        };

        let value = match (ambiguity, evaluate(right, module.source())) {
            (None, Some(literal)) => BindingValue::Literal(literal),
            _ => BindingValue::Expression(
                module
                    .text(right)
                    .unwrap_or(UNRENDERABLE_SENTINEL)
                    .to_string(),
            ),
        };

        let start = statement.start_position();
        let end = right.end_position();
        tracing::debug!(name, line = start.row + 1, ?ambiguity, "classified binding");

        bindings.push(Binding {
            name: name.to_string(),
            value,
            declared_at: Position::new(start.row + 1, start.column),
            value_end: Position::new(end.row + 1, end.column),
            ambiguity,
        });
    }

    bindings
}

/// Parse and classify source text.
///
/// Never fails: source that does not parse has no bindings.
pub fn classify_source(source: &str) -> Vec<Binding> {
    match PythonModule::parse(source, "<source>") {
        Ok(module) => classify(&module),
        Err(err) => {
            tracing::debug!(error = %err, "source does not parse");
            Vec::new()
        }
    }
}

/// Count how often each name is bound at module scope.
///
/// Covers assignments of every shape, `for` targets and `with ... as`
/// targets, including those nested in top-level compound statements, plus
/// `global` declarations inside functions.
pub fn bound_names(module: &PythonModule) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for statement in module.statements() {
        collect_module_scope(statement, module, &mut counts);
    }
    counts
}

fn single_assignment(statement: Node<'_>) -> Option<Node<'_>> {
    if statement.kind() != "expression_statement" || statement.named_child_count() != 1 {
        return None;
    }
    let mut cursor = statement.walk();
    let child = statement.named_children(&mut cursor).next()?;
    (child.kind() == "assignment").then_some(child)
}

fn shares_line(statements: &[Node<'_>], index: usize) -> bool {
    let statement = statements[index];
    let before = index
        .checked_sub(1)
        .map(|i| statements[i])
        .is_some_and(|prev| prev.end_position().row == statement.start_position().row);
    let after = statements
        .get(index + 1)
        .is_some_and(|next| next.start_position().row == statement.end_position().row);
    before || after
}

fn collect_module_scope(node: Node<'_>, module: &PythonModule, counts: &mut HashMap<String, usize>) {
    match node.kind() {
        "assignment" => {
            if let Some(left) = node.child_by_field_name("left") {
                // A bare annotation (`x: int`) declares without binding.
                if node.child_by_field_name("right").is_some()
                    || node.child_by_field_name("type").is_none()
                {
                    collect_targets(left, module, counts);
                }
            }
            if let Some(right) = node.child_by_field_name("right") {
                collect_module_scope(right, module, counts);
            }
            return;
        }
        "augmented_assignment" => {
            if let Some(left) = node.child_by_field_name("left") {
                collect_targets(left, module, counts);
            }
            return;
        }
        "for_statement" => {
            if let Some(left) = node.child_by_field_name("left") {
                collect_targets(left, module, counts);
            }
        }
        "as_pattern" => {
            if let Some(alias) = node.child_by_field_name("alias") {
                collect_targets(alias, module, counts);
            }
        }
        "function_definition" => {
            collect_globals(node, module, counts);
            return;
        }
        "class_definition" | "lambda" | "list_comprehension" | "set_comprehension"
        | "dictionary_comprehension" | "generator_expression" => return,
        _ => {}
    }

    let descend = matches!(node.kind(), "expression_statement" | "decorated_definition")
        || MODULE_SCOPE_BLOCKS.contains(&node.kind())
        || node.parent().is_some_and(|p| p.kind() != "module");
    if !descend {
        return;
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
    for child in children {
        collect_module_scope(child, module, counts);
    }
}

fn collect_targets(node: Node<'_>, module: &PythonModule, counts: &mut HashMap<String, usize>) {
    match node.kind() {
        "identifier" => {
            if let Some(name) = module.text(node) {
                *counts.entry(name.to_string()).or_default() += 1;
            }
        }
        "pattern_list" | "tuple_pattern" | "list_pattern" | "list_splat_pattern"
        | "parenthesized_expression" | "as_pattern_target" => {
            let mut cursor = node.walk();
            let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
            for child in children {
                collect_targets(child, module, counts);
            }
        }
        _ => {}
    }
}

fn collect_globals(node: Node<'_>, module: &PythonModule, counts: &mut HashMap<String, usize>) {
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
    for child in children {
        if child.kind() == "global_statement" {
            let mut inner = child.walk();
            for name in child.named_children(&mut inner) {
                collect_targets(name, module, counts);
            }
        } else {
            collect_globals(child, module, counts);
        }
    }
}

#[cfg(test)]
mod tests {
    use simman_ir::{BindingKind, LiteralValue};

    use super::*;

    fn module(source: &str) -> PythonModule {
        PythonModule::parse(source, "test.py").unwrap()
    }

    #[test]
    fn test_scenario_a() {
        let bindings = classify_source("WIDTH = 10\nHEIGHT = WIDTH * 2\n");
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].name, "WIDTH");
        assert_eq!(bindings[0].literal(), Some(&LiteralValue::Int(10)));
        assert_eq!(bindings[0].declared_at, Position::new(1, 0));
        assert_eq!(bindings[1].kind(), BindingKind::Expression);
        assert_eq!(
            bindings[1].value,
            BindingValue::Expression("WIDTH * 2".into())
        );
    }

    #[test]
    fn test_skips_non_bindings() {
        let source = "\
import os
_PRIVATE = 1
a = b = 2
x, y = 1, 2
count: int = 3
obj.attr = 4
def f():
    inner = 5
class C:
    field = 6
";
        assert!(classify_source(source).is_empty());
    }

    #[test]
    fn test_rebinding_is_ambiguous() {
        let source = "STEPS = 5\nSTEPS = 6\nRATE = 0.1\nRATE += 0.1\n";
        let bindings = classify_source(source);
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].ambiguity, Some(Ambiguity::Rebound { count: 2 }));
        assert_eq!(bindings[0].kind(), BindingKind::Expression);
        assert_eq!(bindings[1].ambiguity, Some(Ambiguity::Rebound { count: 2 }));
    }

    #[test]
    fn test_rebinding_through_blocks_and_globals() {
        let source = "\
DEBUG = False
if True:
    DEBUG = True
LIMIT = 3
def bump():
    global LIMIT
    LIMIT += 1
SEED = 1
for SEED in range(3):
    pass
";
        let bindings = classify_source(source);
        let rebound: Vec<&str> = bindings
            .iter()
            .filter(|b| b.ambiguity.is_some())
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(rebound, vec!["DEBUG", "LIMIT", "SEED"]);
    }

    #[test]
    fn test_shared_line() {
        let bindings = classify_source("A = 1; B = 2\nC = 3  # note\n");
        assert_eq!(bindings[0].ambiguity, Some(Ambiguity::SharedLine));
        assert_eq!(bindings[1].ambiguity, Some(Ambiguity::SharedLine));
        assert_eq!(bindings[2].ambiguity, None);
    }

    #[test]
    fn test_value_end_excludes_trailing_comment() {
        let bindings = classify_source("RATE = 0.5  # per second\n");
        assert_eq!(bindings[0].value_end, Position::new(1, 10));
    }

    #[test]
    fn test_multiline_value_end() {
        let bindings = classify_source("TITLE = (\n    'a'\n    'b'\n)\nN = 1\n");
        assert_eq!(bindings[0].literal(), Some(&LiteralValue::Str("ab".into())));
        assert_eq!(bindings[0].end_line(), 4);
        assert_eq!(bindings[1].declared_at.line, 5);
    }

    #[test]
    fn test_parse_failure_degrades_to_nothing() {
        assert!(classify_source("WIDTH = (\n").is_empty());
    }

    #[test]
    fn test_bound_names() {
        let counts = bound_names(&module(
            "x = 1\nwith open('f') as fh:\n    x = 2\nfor i, j in []:\n    pass\n",
        ));
        assert_eq!(counts.get("x"), Some(&2));
        assert_eq!(counts.get("fh"), Some(&1));
        assert_eq!(counts.get("i"), Some(&1));
        assert_eq!(counts.get("j"), Some(&1));
    }
}
