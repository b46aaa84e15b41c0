//! Python front end for the simman extractor.
//!
//! Parses scripts with tree-sitter and answers the questions the extractor
//! asks about a module:
//!
//! - [`classify`] - which module-level bindings are literals
//! - [`Layout`] - where a scaffold can be inserted and which imports exist
//! - [`ExistingScaffold`] - whether a previous run already rewrote the file

mod classify;
mod layout;
mod literal;
mod module;
mod scaffold;

pub use classify::{bound_names, classify, classify_source};
pub use layout::{Layout, Newline};
pub use literal::{evaluate, parse_float, parse_int, parse_string};
pub use module::PythonModule;
pub use scaffold::ExistingScaffold;
