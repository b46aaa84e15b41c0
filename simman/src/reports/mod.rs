//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod extract;
mod output;
mod scan;

pub use extract::{ExtractReport, PreviewFile};
pub use output::{Report, TerminalOutput};
pub use scan::{ScanReport, ScannedBinding, ScannedFile};
