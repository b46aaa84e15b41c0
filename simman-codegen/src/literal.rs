//! Rendering of values as Python source literals.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use simman_ir::{LiteralValue, SequenceKind, python_float};

/// Render a string as a double-quoted Python string literal.
pub fn python_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render a literal value as Python source.
pub fn python_literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Bool(true) => "True".to_string(),
        LiteralValue::Bool(false) => "False".to_string(),
        LiteralValue::Int(i) => i.to_string(),
        LiteralValue::Float(x) => python_float(*x),
        LiteralValue::Str(s) => python_string(s),
        LiteralValue::Sequence { kind, items } => {
            let items: Vec<String> = items.iter().map(python_literal).collect();
            match kind {
                SequenceKind::List => format!("[{}]", items.join(", ")),
                SequenceKind::Tuple if items.len() == 1 => format!("({},)", items[0]),
                SequenceKind::Tuple => format!("({})", items.join(", ")),
            }
        }
        LiteralValue::Mapping(pairs) => {
            let pairs: Vec<String> = pairs
                .iter()
                .map(|(k, v)| format!("{}: {}", python_literal(k), python_literal(v)))
                .collect();
            format!("{{{}}}", pairs.join(", "))
        }
    }
}

/// JSON formatter that emits Python literal syntax.
///
/// Structure and indentation come from [`PrettyFormatter`]; only the
/// `true`/`false`/`null` tokens differ. JSON string escapes are all valid in
/// Python string literals.
pub struct PythonFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl PythonFormatter<'_> {
    /// Two-space indentation.
    pub fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Default for PythonFormatter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for PythonFormatter<'_> {
    fn write_null<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b"None")
    }

    fn write_bool<W>(&mut self, writer: &mut W, value: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(if value { b"True" } else { b"False" })
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_value(writer)
    }
}

/// Serialize a value as a Python literal expression.
pub fn to_python_literal<T>(value: &T) -> serde_json::Result<String>
where
    T: ?Sized + Serialize,
{
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, PythonFormatter::new());
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(<serde_json::Error as serde::ser::Error>::custom)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_python_string_escapes() {
        assert_eq!(python_string("out/data.csv"), "\"out/data.csv\"");
        assert_eq!(python_string("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
        assert_eq!(python_string("C:\\tmp"), "\"C:\\\\tmp\"");
        assert_eq!(python_string("\x1b"), "\"\\x1b\"");
        assert_eq!(python_string("héllo"), "\"héllo\"");
    }

    #[test]
    fn test_python_literal_scalars() {
        assert_eq!(python_literal(&LiteralValue::Bool(true)), "True");
        assert_eq!(python_literal(&LiteralValue::Int(-3)), "-3");
        assert_eq!(python_literal(&LiteralValue::Float(2.0)), "2.0");
        assert_eq!(python_literal(&LiteralValue::Float(1e-7)), "1e-7");
        assert_eq!(python_literal(&LiteralValue::Str("a".into())), "\"a\"");
    }

    #[test]
    fn test_python_literal_collections() {
        let tuple = LiteralValue::Sequence {
            kind: SequenceKind::Tuple,
            items: vec![LiteralValue::Int(1)],
        };
        assert_eq!(python_literal(&tuple), "(1,)");

        let mapping = LiteralValue::Mapping(vec![(
            LiteralValue::Str("on".into()),
            LiteralValue::Bool(false),
        )]);
        assert_eq!(python_literal(&mapping), "{\"on\": False}");
    }

    #[test]
    fn test_to_python_literal() {
        let value = json!({"a.py": {"DEBUG": {"type": "bool", "value": true}}, "b.py": {}, "n": null});
        let text = to_python_literal(&value).unwrap();
        assert_eq!(
            text,
            "{\n  \"a.py\": {\n    \"DEBUG\": {\n      \"type\": \"bool\",\n      \"value\": True\n    }\n  },\n  \"b.py\": {},\n  \"n\": None\n}"
        );
    }
}
