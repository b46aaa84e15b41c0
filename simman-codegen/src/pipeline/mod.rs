//! Extraction pipeline for a directory of scripts.
//!
//! The [`Pipeline`] runs a fixed sequence of phases over every candidate
//! file (read → parse → model → rewrite → write), then aggregates the
//! [`Manifest`](simman_ir::Manifest) and writes the launcher. It provides:
//!
//! - Explicit phase boundaries with a per-file [`FileContext`]
//! - Plugin hooks for extensibility (before/after each phase, after each file)
//! - Per-file diagnostics and a [`DirectoryReport`] summary
//!
//! A failure in one file never stops the others: unreadable or unparsable
//! files are skipped, and a rewrite that fails verification leaves the file
//! untouched.
//!
//! # Example
//!
//! ```ignore
//! use simman_codegen::pipeline::process_directory;
//!
//! let report = process_directory(dir, &settings)?;
//! for summary in &report.files {
//!     println!("{}: {}", summary.file, summary.status);
//! }
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod summary;

pub use context::FileContext;
pub use diagnostic::{Diagnostic, Location, Severity};
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::{Pipeline, process_directory};
pub use summary::{DirectoryReport, FileStatus, FileSummary, Unchanged};
