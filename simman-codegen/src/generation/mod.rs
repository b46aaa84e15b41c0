//! Helpers shared by the generated files.

mod imports;

pub use imports::ImportCollector;
