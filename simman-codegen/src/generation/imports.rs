//! Import statements for generated Python.

use indexmap::IndexSet;

/// Deduplicated `import <module>` statements, in first-added order.
///
/// # Example
///
/// ```
/// use simman_codegen::generation::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add_module("sys");
/// imports.add_module("os");
/// imports.add_module("sys");
///
/// assert_eq!(imports.lines(), vec!["import sys", "import os"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    modules: IndexSet<String>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_module(&mut self, module: &str) {
        self.modules.insert(module.to_string());
    }

    pub fn lines(&self) -> Vec<String> {
        self.modules
            .iter()
            .map(|module| format!("import {}", module))
            .collect()
    }

    /// Statements not already present, verbatim, among `existing`.
    ///
    /// Only exact matches count: `import argparse as ap` does not bind
    /// `argparse`, so the plain import is still emitted.
    pub fn lines_excluding(&self, existing: &[String]) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| !existing.contains(line))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicates_in_order() {
        let mut imports = ImportCollector::new();
        imports.add_module("subprocess");
        imports.add_module("os");
        imports.add_module("subprocess");

        assert_eq!(imports.lines(), vec!["import subprocess", "import os"]);
    }

    #[test]
    fn test_lines_excluding_existing() {
        let mut imports = ImportCollector::new();
        imports.add_module("argparse");

        assert!(imports.lines_excluding(&["import argparse".to_string()]).is_empty());
        assert_eq!(
            imports.lines_excluding(&["import argparse as ap".to_string()]),
            vec!["import argparse"]
        );
    }
}
