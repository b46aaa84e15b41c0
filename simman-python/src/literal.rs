//! Static evaluation of Python literal expressions.
//!
//! Only a closed grammar is understood: numbers, strings, booleans, negated
//! numbers, parentheses and list/tuple/dict displays built from those.
//! Everything else evaluates to `None` and stays an expression.

use simman_ir::{LiteralValue, SequenceKind};
use tree_sitter::Node;

/// Evaluate a syntax node to a literal value, if it is one.
pub fn evaluate(node: Node<'_>, source: &str) -> Option<LiteralValue> {
    let text = |n: Node<'_>| n.utf8_text(source.as_bytes()).ok();

    match node.kind() {
        "true" => Some(LiteralValue::Bool(true)),
        "false" => Some(LiteralValue::Bool(false)),
        "integer" => parse_int(text(node)?).and_then(narrow).map(LiteralValue::Int),
        "float" => parse_float(text(node)?).map(LiteralValue::Float),
        "string" => parse_string(text(node)?).map(LiteralValue::Str),
        "concatenated_string" => {
            let mut joined = String::new();
            for part in elements(node) {
                joined.push_str(&parse_string(text(part)?)?);
            }
            Some(LiteralValue::Str(joined))
        }
        "unary_operator" => {
            let operator = text(node.child_by_field_name("operator")?)?;
            let argument = node.child_by_field_name("argument")?;
            if operator != "-" {
                return None;
            }
            match argument.kind() {
                "integer" => parse_int(text(argument)?)
                    .map(|i| -i)
                    .and_then(narrow)
                    .map(LiteralValue::Int),
                "float" => parse_float(text(argument)?).map(|x| LiteralValue::Float(-x)),
                _ => None,
            }
        }
        "parenthesized_expression" => evaluate(elements(node).into_iter().next()?, source),
        "list" => sequence(node, source, SequenceKind::List),
        "tuple" | "expression_list" => sequence(node, source, SequenceKind::Tuple),
        "dictionary" => {
            let mut pairs = Vec::new();
            for pair in elements(node) {
                if pair.kind() != "pair" {
                    return None;
                }
                let key = evaluate(pair.child_by_field_name("key")?, source)?;
                let value = evaluate(pair.child_by_field_name("value")?, source)?;
                pairs.push((key, value));
            }
            Some(LiteralValue::Mapping(pairs))
        }
        _ => None,
    }
}

/// Named children without interleaved comments.
fn elements(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

fn sequence(node: Node<'_>, source: &str, kind: SequenceKind) -> Option<LiteralValue> {
    let items = elements(node)
        .into_iter()
        .map(|item| evaluate(item, source))
        .collect::<Option<Vec<_>>>()?;
    Some(LiteralValue::Sequence { kind, items })
}

fn narrow(value: i128) -> Option<i64> {
    i64::try_from(value).ok()
}

/// Parse a Python integer token (`1_000`, `0x1F`, `0o17`, `0b101`).
///
/// Imaginary (`1j`) and out-of-range values return `None`.
pub fn parse_int(text: &str) -> Option<i128> {
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    let lower = digits.to_ascii_lowercase();

    let (radix, body) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest)
    } else {
        if lower.len() > 1 && lower.starts_with('0') && lower.chars().any(|c| c != '0') {
            return None;
        }
        (10, lower.as_str())
    };

    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    i128::from_str_radix(body, radix).ok()
}

/// Parse a Python float token (`1.5`, `.5`, `1.`, `1e-3`, `1_000.0`).
///
/// Imaginary and non-finite values return `None`.
pub fn parse_float(text: &str) -> Option<f64> {
    if text.ends_with(['j', 'J']) {
        return None;
    }
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    let value: f64 = digits.parse().ok()?;
    value.is_finite().then_some(value)
}

/// Decode a Python string token including its prefix and quotes.
///
/// Accepts the `r` and `u` prefixes. Bytes, f-strings and `\N{...}` escapes
/// return `None`.
pub fn parse_string(text: &str) -> Option<String> {
    let quote_at = text.find(['\'', '"'])?;
    let prefix = text[..quote_at].to_ascii_lowercase();
    let raw = match prefix.as_str() {
        "" | "u" => false,
        "r" => true,
        _ => return None,
    };

    let quoted = &text[quote_at..];
    let delimiter = ["\"\"\"", "'''", "\"", "'"]
        .into_iter()
        .find(|d| quoted.starts_with(d))?;
    if quoted.len() < delimiter.len() * 2 || !quoted.ends_with(delimiter) {
        return None;
    }
    let body = &quoted[delimiter.len()..quoted.len() - delimiter.len()];

    if raw {
        Some(body.to_string())
    } else {
        unescape(body)
    }
}

fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            out.push('\\');
            break;
        };
        match escape {
            '\n' => {}
            '\r' => {
                chars.next_if_eq(&'\n');
            }
            '\\' | '\'' | '"' => out.push(escape),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let mut code = escape.to_digit(8)?;
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(code)?);
            }
            'x' => out.push(hex_escape(&mut chars, 2)?),
            'u' => out.push(hex_escape(&mut chars, 4)?),
            'U' => out.push(hex_escape(&mut chars, 8)?),
            'N' => return None,
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    Some(out)
}

fn hex_escape(chars: &mut impl Iterator<Item = char>, width: usize) -> Option<char> {
    let digits: String = chars.take(width).collect();
    if digits.len() != width {
        return None;
    }
    char::from_u32(u32::from_str_radix(&digits, 16).ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PythonModule;

    fn eval(expr: &str) -> Option<LiteralValue> {
        let module = PythonModule::parse(format!("X = {}\n", expr), "test.py").unwrap();
        let statement = module.statements()[0];
        let assignment = statement.named_child(0).unwrap();
        evaluate(assignment.child_by_field_name("right").unwrap(), module.source())
    }

    #[test]
    fn test_integers() {
        assert_eq!(parse_int("1_000"), Some(1000));
        assert_eq!(parse_int("0x1F"), Some(31));
        assert_eq!(parse_int("0o17"), Some(15));
        assert_eq!(parse_int("0b101"), Some(5));
        assert_eq!(parse_int("0"), Some(0));
        assert_eq!(parse_int("00"), Some(0));
        assert_eq!(parse_int("1j"), None);
        assert_eq!(parse_int("10L"), None);
    }

    #[test]
    fn test_floats() {
        assert_eq!(parse_float("1.5"), Some(1.5));
        assert_eq!(parse_float(".5"), Some(0.5));
        assert_eq!(parse_float("1."), Some(1.0));
        assert_eq!(parse_float("1e-3"), Some(0.001));
        assert_eq!(parse_float("1_000.25"), Some(1000.25));
        assert_eq!(parse_float("2.5j"), None);
        assert_eq!(parse_float("1e999"), None);
    }

    #[test]
    fn test_strings() {
        assert_eq!(parse_string("'abc'").as_deref(), Some("abc"));
        assert_eq!(parse_string(r#""a\tb\n""#).as_deref(), Some("a\tb\n"));
        assert_eq!(parse_string(r#"r"a\tb""#).as_deref(), Some(r"a\tb"));
        assert_eq!(parse_string(r#"u"\x41é\101""#).as_deref(), Some("AéA"));
        assert_eq!(parse_string("\"\"\"multi\nline\"\"\"").as_deref(), Some("multi\nline"));
        assert_eq!(parse_string(r#""\d""#).as_deref(), Some(r"\d"));
        assert_eq!(parse_string("'a\\\nb'").as_deref(), Some("ab"));
        assert_eq!(parse_string("b'abc'"), None);
        assert_eq!(parse_string("f'{x}'"), None);
        assert_eq!(parse_string(r#""\N{BULLET}""#), None);
    }

    #[test]
    fn test_evaluate_scalars() {
        assert_eq!(eval("True"), Some(LiteralValue::Bool(true)));
        assert_eq!(eval("42"), Some(LiteralValue::Int(42)));
        assert_eq!(eval("-3"), Some(LiteralValue::Int(-3)));
        assert_eq!(eval("-0.25"), Some(LiteralValue::Float(-0.25)));
        assert_eq!(eval("(7)"), Some(LiteralValue::Int(7)));
        assert_eq!(eval("'a' \"b\""), Some(LiteralValue::Str("ab".into())));
        assert_eq!(
            eval("-9223372036854775808"),
            Some(LiteralValue::Int(i64::MIN))
        );
    }

    #[test]
    fn test_evaluate_rejects_expressions() {
        assert_eq!(eval("None"), None);
        assert_eq!(eval("WIDTH * 2"), None);
        assert_eq!(eval("-(-1)"), None);
        assert_eq!(eval("+1"), None);
        assert_eq!(eval("~1"), None);
        assert_eq!(eval("f'{WIDTH}'"), None);
        assert_eq!(eval("{1, 2}"), None);
        assert_eq!(eval("[*a]"), None);
        assert_eq!(eval("[i for i in range(3)]"), None);
        assert_eq!(eval("9223372036854775808"), None);
    }

    #[test]
    fn test_evaluate_collections() {
        assert_eq!(
            eval("[1, 'a']"),
            Some(LiteralValue::Sequence {
                kind: SequenceKind::List,
                items: vec![LiteralValue::Int(1), LiteralValue::Str("a".into())],
            })
        );
        assert_eq!(
            eval("1, 2"),
            Some(LiteralValue::Sequence {
                kind: SequenceKind::Tuple,
                items: vec![LiteralValue::Int(1), LiteralValue::Int(2)],
            })
        );
        assert_eq!(
            eval("{\n    'dt': 0.1,  # step\n}"),
            Some(LiteralValue::Mapping(vec![(
                LiteralValue::Str("dt".into()),
                LiteralValue::Float(0.1)
            )]))
        );
        assert_eq!(eval("[1, x]"), None);
    }
}
