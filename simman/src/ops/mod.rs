//! Core operations.
//!
//! This module contains the business logic for simman commands,
//! separated from CLI argument parsing and output rendering.

pub mod extract;
pub mod scan;

pub use extract::{ExtractOptions, extract};
pub use scan::scan;
