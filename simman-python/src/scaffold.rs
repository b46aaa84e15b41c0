//! Detection of an argument-parsing scaffold written by a previous run.

use simman_ir::{LiteralValue, ScaffoldOption, TypeTag};
use tree_sitter::Node;

use crate::{PythonModule, literal::evaluate, literal::parse_string};

/// The scaffold found in an already rewritten module.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistingScaffold {
    /// 1-based line of `<namespace> = <parser>.parse_args()`.
    pub line: usize,
    /// Options recovered from `<parser>.add_argument(...)` calls.
    pub options: Vec<ScaffoldOption>,
}

impl ExistingScaffold {
    /// Look for `<namespace> = <parser>.parse_args()` at module scope.
    pub fn detect(module: &PythonModule, parser: &str, namespace: &str) -> Option<Self> {
        let statements = module.statements();

        let line = statements.iter().find_map(|statement| {
            let assignment = only_child(*statement, "assignment")?;
            let left = assignment.child_by_field_name("left")?;
            let right = assignment.child_by_field_name("right")?;
            let is_parse = left.kind() == "identifier"
                && module.text(left) == Some(namespace)
                && method_call(right, module, parser) == Some("parse_args");
            is_parse.then(|| statement.start_position().row + 1)
        })?;

        let options = statements
            .iter()
            .filter_map(|statement| only_child(*statement, "call"))
            .filter(|call| method_call(*call, module, parser) == Some("add_argument"))
            .filter_map(|call| recover_option(call, module))
            .collect();

        Some(Self { line, options })
    }
}

fn only_child<'a>(statement: Node<'a>, kind: &str) -> Option<Node<'a>> {
    if statement.kind() != "expression_statement" || statement.named_child_count() != 1 {
        return None;
    }
    let mut cursor = statement.walk();
    let child = statement.named_children(&mut cursor).next()?;
    (child.kind() == kind).then_some(child)
}

/// For `<receiver>.<method>(...)`, return the method name.
fn method_call<'m>(node: Node<'_>, module: &'m PythonModule, receiver: &str) -> Option<&'m str> {
    if node.kind() != "call" {
        return None;
    }
    let function = node.child_by_field_name("function")?;
    if function.kind() != "attribute" {
        return None;
    }
    let object = function.child_by_field_name("object")?;
    if object.kind() != "identifier" || module.text(object) != Some(receiver) {
        return None;
    }
    module.text(function.child_by_field_name("attribute")?)
}

fn recover_option(call: Node<'_>, module: &PythonModule) -> Option<ScaffoldOption> {
    let arguments = call.child_by_field_name("arguments")?;
    let mut cursor = arguments.walk();

    let mut flag = None;
    let mut dest = None;
    let mut type_tag = TypeTag::Str;
    let mut default = None;

    for argument in arguments.named_children(&mut cursor) {
        match argument.kind() {
            "string" => {
                let name = parse_string(module.text(argument)?)?;
                if let Some(long) = name.strip_prefix("--").filter(|_| flag.is_none()) {
                    flag = Some(long.to_string());
                }
            }
            "keyword_argument" => {
                let key = module.text(argument.child_by_field_name("name")?)?;
                let value = argument.child_by_field_name("value")?;
                match key {
                    "type" => {
                        type_tag = match (value.kind(), module.text(value)?) {
                            ("lambda", _) => TypeTag::Bool,
                            (_, "int") => TypeTag::Int,
                            (_, "float") => TypeTag::Float,
                            (_, "str") => TypeTag::Str,
                            _ => return None,
                        }
                    }
                    "default" => default = evaluate(value, module.source()),
                    "dest" => dest = parse_string(module.text(value)?),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    let flag = flag?;
    let default = default?;
    let default = match (type_tag, default) {
        (TypeTag::Float, LiteralValue::Int(i)) => LiteralValue::Float(i as f64),
        (tag, value) if value.type_tag() == Some(tag) => value,
        _ => return None,
    };

    Some(ScaffoldOption {
        dest: dest.unwrap_or_else(|| simman_core::flag_dest(&flag)),
        flag,
        type_tag,
        default,
        line: call.start_position().row + 1,
    })
}
