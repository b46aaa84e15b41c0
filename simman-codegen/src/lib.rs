//! Code generation and the extraction pipeline for simman.
//!
//! This crate turns classified bindings into output: the `argparse`
//! scaffold inserted into each script, the in-place rewrite of literal
//! bindings, and the interactive launcher that embeds the manifest.
//!
//! # Module Organization
//!
//! - [`builder`] - Line-oriented text building (CodeBuilder)
//! - [`generation`] - Output helpers (ImportCollector)
//! - [`literal`] - Python literal rendering of values and the manifest
//! - [`scaffold`] - The argument-parsing block
//! - [`rewrite`] - In-place rewriting with re-parse verification
//! - [`launcher`] - The generated `manager.py`
//! - [`pipeline`] - Per-directory orchestration (Pipeline, process_directory)

pub mod builder;
pub mod generation;
pub mod launcher;
pub mod literal;
pub mod pipeline;
pub mod rewrite;
pub mod scaffold;

pub use pipeline::{DirectoryReport, FileStatus, Pipeline, process_directory};
