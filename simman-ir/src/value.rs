//! Statically evaluated literal values.

use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeSeq};

/// The kind of a literal sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    List,
    Tuple,
}

/// A value that can be determined without executing the script.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A list or tuple of literals.
    Sequence {
        kind: SequenceKind,
        items: Vec<LiteralValue>,
    },
    /// A dict of literals, in source order.
    Mapping(Vec<(LiteralValue, LiteralValue)>),
}

impl LiteralValue {
    /// The scalar type tag, or `None` for collections.
    pub fn type_tag(&self) -> Option<TypeTag> {
        match self {
            LiteralValue::Bool(_) => Some(TypeTag::Bool),
            LiteralValue::Int(_) => Some(TypeTag::Int),
            LiteralValue::Float(_) => Some(TypeTag::Float),
            LiteralValue::Str(_) => Some(TypeTag::Str),
            LiteralValue::Sequence { .. } | LiteralValue::Mapping(_) => None,
        }
    }

    /// Returns true for lists, tuples and dicts.
    pub fn is_collection(&self) -> bool {
        self.type_tag().is_none()
    }

    /// Get the string content if this is a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Render a float the way Python accepts it back as a float expression.
pub fn python_float(value: f64) -> String {
    if value.is_nan() {
        return "float(\"nan\")".to_string();
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("float(\"{}inf\")", sign);
    }
    // Debug keeps a trailing `.0` on integral values, which Python needs to
    // read the value back as a float.
    format!("{:?}", value)
}

/// Formats like Python's `str()`: strings unquoted, booleans as `True`/`False`.
impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Str(s) => f.write_str(s),
            other => write_repr(other, f),
        }
    }
}

fn write_repr(value: &LiteralValue, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        LiteralValue::Bool(true) => f.write_str("True"),
        LiteralValue::Bool(false) => f.write_str("False"),
        LiteralValue::Int(i) => write!(f, "{}", i),
        LiteralValue::Float(x) => f.write_str(&python_float(*x)),
        LiteralValue::Str(s) => write!(f, "{:?}", s),
        LiteralValue::Sequence { kind, items } => {
            let (open, close) = match kind {
                SequenceKind::List => ("[", "]"),
                SequenceKind::Tuple => ("(", ")"),
            };
            f.write_str(open)?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_repr(item, f)?;
            }
            if *kind == SequenceKind::Tuple && items.len() == 1 {
                f.write_str(",")?;
            }
            f.write_str(close)
        }
        LiteralValue::Mapping(pairs) => {
            f.write_str("{")?;
            for (i, (key, value)) in pairs.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_repr(key, f)?;
                f.write_str(": ")?;
                write_repr(value, f)?;
            }
            f.write_str("}")
        }
    }
}

/// Scalars serialize natively; a dict serializes as a list of `[key, value]`
/// pairs because its keys need not be strings.
impl Serialize for LiteralValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LiteralValue::Bool(b) => serializer.serialize_bool(*b),
            LiteralValue::Int(i) => serializer.serialize_i64(*i),
            LiteralValue::Float(x) => serializer.serialize_f64(*x),
            LiteralValue::Str(s) => serializer.serialize_str(s),
            LiteralValue::Sequence { items, .. } => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            LiteralValue::Mapping(pairs) => {
                let mut seq = serializer.serialize_seq(Some(pairs.len()))?;
                for pair in pairs {
                    seq.serialize_element(&(&pair.0, &pair.1))?;
                }
                seq.end()
            }
        }
    }
}

/// Scalar type of a configurable value, named after the Python builtin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Bool,
    Int,
    Float,
    Str,
}

impl TypeTag {
    /// The Python builtin name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Bool => "bool",
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Str => "str",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
