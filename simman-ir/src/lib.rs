//! Configuration model for the simman extractor.
//!
//! This crate holds the language-level facts the classifier discovers and the
//! configuration records derived from them.
//!
//! # Architecture
//!
//! ```text
//! script.py → simman-python (classify) → simman-ir (model) → simman-codegen
//! ```
//!
//! - [`Binding`] - a module-level assignment, literal or expression
//! - [`FileConfiguration`] - the ordered configurable entries of one file
//! - [`Manifest`] - every file's configuration, embedded into the launcher

mod binding;
mod config;
mod manifest;
mod value;

pub use binding::{Ambiguity, Binding, BindingKind, BindingValue, Position, ScaffoldOption};
pub use config::{
    ConfigurationEntry, EntryOrigin, FileConfiguration, RejectReason, Rejection,
    UNRENDERABLE_SENTINEL, looks_like_expression,
};
pub use manifest::Manifest;
pub use value::{LiteralValue, SequenceKind, TypeTag, python_float};
