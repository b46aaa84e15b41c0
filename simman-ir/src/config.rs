//! Configuration entries and the model builder that derives them from bindings.

use std::collections::HashMap;

use serde::{Serialize, Serializer, ser::SerializeMap, ser::SerializeStruct};
use simman_core::{flag_dest, flag_name, is_python_keyword};

use crate::{Ambiguity, Binding, BindingValue, LiteralValue, Position, ScaffoldOption, TypeTag};

/// Placeholder used when the source text of an expression cannot be recovered.
pub const UNRENDERABLE_SENTINEL: &str = "<unrenderable>";

/// Substrings that make a string value look like a stringified expression.
const EXPRESSION_MARKERS: &[&str] = &[
    " + ", " - ", " * ", " / ", "//", " % ", "**", "(", ")", "[", "]", "{", "}",
];

/// Heuristic guard for residual expressions stored as strings.
///
/// This is best-effort substring matching and nothing more: it rejects
/// legitimate text such as `"Results (final)"` and accepts operator text
/// written without spaces such as `"a+b"`.
pub fn looks_like_expression(value: &str) -> bool {
    value.starts_with(UNRENDERABLE_SENTINEL) || EXPRESSION_MARKERS.iter().any(|m| value.contains(m))
}

/// Where a configuration entry comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOrigin {
    /// A literal binding that still has to be rewritten.
    Literal,
    /// A binding already reading from an existing scaffold.
    Scaffold,
}

/// A binding that can be overridden from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationEntry {
    /// The identifier in the source file.
    pub name: String,
    /// Default value.
    pub value: LiteralValue,
    pub type_tag: TypeTag,
    /// Flag name without the leading `--`.
    pub flag_name: String,
    pub declared_at: Position,
    /// End of the value in the source, used to keep trailing comments.
    pub value_end: Position,
    pub origin: EntryOrigin,
}

impl ConfigurationEntry {
    /// The flag as passed on the command line (e.g. `--max-speed`).
    pub fn arg(&self) -> String {
        format!("--{}", self.flag_name)
    }

    /// The namespace attribute the parsed value is read from.
    pub fn dest(&self) -> String {
        flag_dest(&self.flag_name)
    }

    /// Last line covered by the original assignment.
    pub fn end_line(&self) -> usize {
        self.value_end.line
    }
}

/// Manifest record shape: `{value, type, line, arg}`.
impl Serialize for ConfigurationEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("ConfigurationEntry", 4)?;
        record.serialize_field("value", &self.value)?;
        record.serialize_field("type", &self.type_tag)?;
        record.serialize_field("line", &self.declared_at.line)?;
        record.serialize_field("arg", &self.arg())?;
        record.end()
    }
}

/// Why a binding did not become a configuration entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Depends on runtime computation.
    Expression,
    /// A list, tuple or dict literal.
    Collection,
    /// A string that looks like a stringified expression.
    LooksLikeExpression,
    Ambiguous(Ambiguity),
    /// Another entry already maps to the same flag.
    DuplicateFlag { flag: String, other: String },
    /// The flag collides with one argparse defines itself.
    ReservedFlag { flag: String },
    /// The namespace attribute would be a Python keyword.
    KeywordDest { dest: String },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::Expression => f.write_str("expression kept inline"),
            RejectReason::Collection => f.write_str("collection literal kept inline"),
            RejectReason::LooksLikeExpression => {
                f.write_str("string looks like an expression, kept inline")
            }
            RejectReason::Ambiguous(ambiguity) => write!(f, "ambiguous: {}", ambiguity),
            RejectReason::DuplicateFlag { flag, other } => {
                write!(f, "flag --{} is already used by '{}'", flag, other)
            }
            RejectReason::ReservedFlag { flag } => {
                write!(f, "flag --{} is reserved by argparse", flag)
            }
            RejectReason::KeywordDest { dest } => {
                write!(f, "'{}' is a Python keyword and cannot be read back", dest)
            }
        }
    }
}

/// A binding left out of the configuration, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub name: String,
    pub line: usize,
    pub reason: RejectReason,
}

impl Rejection {
    /// Rejections worth surfacing to the user (plain expressions are expected).
    pub fn is_notable(&self) -> bool {
        !matches!(self.reason, RejectReason::Expression)
    }
}

/// The configurable entries of one file, ordered by declaration line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileConfiguration {
    file: String,
    entries: Vec<ConfigurationEntry>,
}

impl FileConfiguration {
    /// Create an empty configuration for a file.
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            entries: Vec::new(),
        }
    }

    /// Build the configuration of a file from its classified bindings.
    ///
    /// `scaffold` holds options recovered from an earlier rewrite; bindings
    /// reading `<namespace>.<dest>` for one of them are kept as
    /// [`EntryOrigin::Scaffold`] entries.
    pub fn build(
        file: impl Into<String>,
        bindings: &[Binding],
        scaffold: &[ScaffoldOption],
        namespace: &str,
    ) -> (Self, Vec<Rejection>) {
        let mut config = Self::new(file);
        let mut rejections = Vec::new();
        let mut used_flags: HashMap<String, String> = HashMap::new();

        let mut ordered: Vec<&Binding> = bindings.iter().collect();
        ordered.sort_by_key(|b| b.declared_at);

        for binding in ordered {
            let reject = |reason| Rejection {
                name: binding.name.clone(),
                line: binding.declared_at.line,
                reason,
            };

            let candidate = match classify_binding(binding, scaffold, namespace) {
                Ok(candidate) => candidate,
                Err(reason) => {
                    rejections.push(reject(reason));
                    continue;
                }
            };

            if let Some(other) = used_flags.get(&candidate.flag) {
                rejections.push(reject(RejectReason::DuplicateFlag {
                    flag: candidate.flag.clone(),
                    other: other.clone(),
                }));
                continue;
            }

            used_flags.insert(candidate.flag.clone(), binding.name.clone());
            config.entries.push(ConfigurationEntry {
                name: binding.name.clone(),
                value: candidate.value,
                type_tag: candidate.type_tag,
                flag_name: candidate.flag,
                declared_at: binding.declared_at,
                value_end: binding.value_end,
                origin: candidate.origin,
            });
        }

        (config, rejections)
    }

    /// The file name this configuration belongs to.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[ConfigurationEntry] {
        &self.entries
    }

    /// Get an entry by identifier.
    pub fn get(&self, name: &str) -> Option<&ConfigurationEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Entries that still have to be rewritten.
    pub fn literal_entries(&self) -> impl Iterator<Item = &ConfigurationEntry> {
        self.entries
            .iter()
            .filter(|e| e.origin == EntryOrigin::Literal)
    }

    /// Whether any entry still has to be rewritten.
    pub fn has_literal_entries(&self) -> bool {
        self.literal_entries().next().is_some()
    }

    /// Keep only entries of the given origin.
    pub fn retain_origin(&mut self, origin: EntryOrigin) {
        self.entries.retain(|e| e.origin == origin);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serializes as `{NAME: record}` in declaration order.
impl Serialize for FileConfiguration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, entry)?;
        }
        map.end()
    }
}

struct Candidate {
    value: LiteralValue,
    type_tag: TypeTag,
    flag: String,
    origin: EntryOrigin,
}

fn classify_binding(
    binding: &Binding,
    scaffold: &[ScaffoldOption],
    namespace: &str,
) -> Result<Candidate, RejectReason> {
    if let Some(ambiguity) = binding.ambiguity {
        return Err(RejectReason::Ambiguous(ambiguity));
    }

    match &binding.value {
        BindingValue::Literal(value) => {
            let type_tag = value.type_tag().ok_or(RejectReason::Collection)?;
            if value.as_str().is_some_and(looks_like_expression) {
                return Err(RejectReason::LooksLikeExpression);
            }

            let flag = flag_name(&binding.name);
            if flag == "help" {
                return Err(RejectReason::ReservedFlag { flag });
            }
            let dest = flag_dest(&flag);
            if is_python_keyword(&dest) {
                return Err(RejectReason::KeywordDest { dest });
            }

            Ok(Candidate {
                value: value.clone(),
                type_tag,
                flag,
                origin: EntryOrigin::Literal,
            })
        }
        BindingValue::Expression(_) => {
            let option = binding
                .reads_namespace(namespace)
                .and_then(|dest| scaffold.iter().find(|o| o.dest == dest))
                .ok_or(RejectReason::Expression)?;

            Ok(Candidate {
                value: option.default.clone(),
                type_tag: option.type_tag,
                flag: option.flag.clone(),
                origin: EntryOrigin::Scaffold,
            })
        }
    }
}
