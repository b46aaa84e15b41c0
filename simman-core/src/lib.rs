//! Core utilities and types for the simman extractor.
//!
//! This crate provides the error taxonomy, the `simman.toml` settings file,
//! Python naming rules and file writing helpers shared by the other crates.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod naming;
mod settings;

pub use error::{Error, Result};
pub use file::{File, FileRules, GeneratedFile, WriteResult};
pub use naming::{
    PYTHON_KEYWORDS, flag_dest, flag_name, is_identifier, is_private, is_python_keyword,
};
pub use settings::{ExtractSettings, SETTINGS_FILE, Settings};
