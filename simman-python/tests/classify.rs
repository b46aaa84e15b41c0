use simman_ir::{Ambiguity, BindingKind, BindingValue, LiteralValue, TypeTag};
use simman_python::{PythonModule, classify, classify_source};

const SIMULATION: &str = r#"#!/usr/bin/env python3
"""Bouncing ball simulation."""
import math
import random

GRAVITY = 9.81  # m/s^2
STEPS = 1_000
LABEL = "ball"
DEBUG = False
OFFSET = -0.5
ANGLE = math.pi / 4
SEEDS = [1, 2, 3]
TITLE = (
    "Bouncing "
    "ball"
)
_CACHE = {}
NOTHING = None


def run():
    return GRAVITY * STEPS
"#;

#[test]
fn classifies_a_realistic_script() {
    let bindings = classify_source(SIMULATION);
    let summary: Vec<(&str, BindingKind, usize)> = bindings
        .iter()
        .map(|b| (b.name.as_str(), b.kind(), b.declared_at.line))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("GRAVITY", BindingKind::Literal, 6),
            ("STEPS", BindingKind::Literal, 7),
            ("LABEL", BindingKind::Literal, 8),
            ("DEBUG", BindingKind::Literal, 9),
            ("OFFSET", BindingKind::Literal, 10),
            ("ANGLE", BindingKind::Expression, 11),
            ("SEEDS", BindingKind::Literal, 12),
            ("TITLE", BindingKind::Literal, 13),
            ("NOTHING", BindingKind::Expression, 18),
        ]
    );

    let title = bindings.iter().find(|b| b.name == "TITLE").unwrap();
    assert_eq!(title.literal(), Some(&LiteralValue::Str("Bouncing ball".into())));
    assert_eq!(title.end_line(), 16);
}

#[test]
fn classification_is_deterministic() {
    let first = classify_source(SIMULATION);
    let second = classify_source(SIMULATION);
    assert_eq!(first, second);
}

#[test]
fn rewritten_bindings_are_not_literals() {
    let rewritten = r#"import math

# Auto-generated argument parsing
import argparse
parser = argparse.ArgumentParser(description="Configurable script")
parser.add_argument("--gravity", type=float, default=9.81, help="Default: 9.81")
parser.add_argument("--debug", type=lambda value: value.strip().lower() in ("true", "1", "yes", "y"), default=False, help="Default: False")
args = parser.parse_args()

GRAVITY = args.gravity  # m/s^2
DEBUG = args.debug
ANGLE = math.pi / 4
"#;
    let bindings = classify_source(rewritten);
    assert!(bindings.iter().all(|b| b.kind() == BindingKind::Expression));

    let gravity = bindings.iter().find(|b| b.name == "GRAVITY").unwrap();
    assert_eq!(gravity.reads_namespace("args"), Some("gravity"));
    let debug = bindings.iter().find(|b| b.name == "DEBUG").unwrap();
    assert_eq!(debug.reads_namespace("args"), Some("debug"));
}

#[test]
fn expression_text_is_verbatim() {
    let bindings = classify_source("AREA = WIDTH  *  HEIGHT   # spacing kept\n");
    assert_eq!(
        bindings[0].value,
        BindingValue::Expression("WIDTH  *  HEIGHT".into())
    );
}

#[test]
fn type_fidelity() {
    let bindings = classify_source("A = 1\nB = 1.0\nC = '1'\nD = True\n");
    let tags: Vec<Option<TypeTag>> = bindings
        .iter()
        .map(|b| b.literal().and_then(LiteralValue::type_tag))
        .collect();
    assert_eq!(
        tags,
        vec![
            Some(TypeTag::Int),
            Some(TypeTag::Float),
            Some(TypeTag::Str),
            Some(TypeTag::Bool)
        ]
    );
}

#[test]
fn rebinding_in_top_level_loop_is_ambiguous() {
    let source = "TOTAL = 0\nfor i in range(3):\n    TOTAL = TOTAL + i\n";
    let bindings = classify_source(source);
    assert_eq!(bindings[0].ambiguity, Some(Ambiguity::Rebound { count: 2 }));
    assert_eq!(bindings[0].value, BindingValue::Expression("0".into()));
}

#[test]
fn parse_failure_is_observable() {
    assert!(PythonModule::parse("WIDTH = [1, 2\n", "broken.py").is_err());
    assert!(classify_source("WIDTH = [1, 2\n").is_empty());
}

#[test]
fn classify_on_parsed_module_matches_source() {
    let module = PythonModule::parse(SIMULATION, "ball.py").unwrap();
    assert_eq!(classify(&module), classify_source(SIMULATION));
}
