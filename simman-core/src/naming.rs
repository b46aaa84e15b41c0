//! Naming rules for Python identifiers and generated command-line flags.

/// Python 3 reserved words.
pub const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Check if a name is a Python reserved word.
pub fn is_python_keyword(name: &str) -> bool {
    PYTHON_KEYWORDS.contains(&name)
}

/// Names starting with an underscore are private by convention and never configurable.
pub fn is_private(name: &str) -> bool {
    name.starts_with('_')
}

/// Check if a string is a valid Python identifier (and not a keyword).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && !is_python_keyword(name)
}

/// Derive the command-line flag name (without the leading `--`) for an identifier.
///
/// The identifier is lower-cased and every underscore that sits between two
/// word characters becomes a hyphen (e.g. "MAX_SPEED" -> "max-speed").
/// Leading, trailing and repeated underscores are kept.
pub fn flag_name(identifier: &str) -> String {
    let chars: Vec<char> = identifier.to_lowercase().chars().collect();
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let internal = i > 0
                && i + 1 < chars.len()
                && chars[i - 1].is_alphanumeric()
                && chars[i + 1].is_alphanumeric();
            if c == '_' && internal { '-' } else { c }
        })
        .collect()
}

/// Translate a flag name back to the attribute argparse stores it under
/// (e.g. "max-speed" -> "max_speed").
pub fn flag_dest(flag_name: &str) -> String {
    flag_name.replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_name() {
        assert_eq!(flag_name("WIDTH"), "width");
        assert_eq!(flag_name("MAX_SPEED"), "max-speed");
        assert_eq!(flag_name("time_step_2"), "time-step-2");
        assert_eq!(flag_name("class_"), "class_");
        assert_eq!(flag_name("A__B"), "a__b");
        assert_eq!(flag_name("maxSpeed"), "maxspeed");
        assert_eq!(flag_name(""), "");
    }

    #[test]
    fn test_flag_dest() {
        assert_eq!(flag_dest("max-speed"), "max_speed");
        assert_eq!(flag_dest("width"), "width");
        assert_eq!(flag_dest(&flag_name("NUM_STEPS")), "num_steps");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("args"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("größe"));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("with-dash"));
        assert!(!is_identifier("class"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_keywords_and_private() {
        assert!(is_python_keyword("lambda"));
        assert!(!is_python_keyword("none"));
        assert!(is_private("_hidden"));
        assert!(!is_private("visible"));
    }
}
