//! Aggregated configuration of every processed file in a directory.

use indexmap::IndexMap;
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::FileConfiguration;

/// Mapping from script file name to its configuration.
///
/// Files are kept in insertion order; the pipeline inserts them sorted by
/// name so the launcher lists them alphabetically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    files: IndexMap<String, FileConfiguration>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the configuration of a file.
    pub fn insert(&mut self, config: FileConfiguration) {
        self.files.insert(config.file().to_string(), config);
    }

    pub fn get(&self, file: &str) -> Option<&FileConfiguration> {
        self.files.get(file)
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total number of configuration entries across all files.
    pub fn entry_count(&self) -> usize {
        self.files.values().map(FileConfiguration::len).sum()
    }

    /// Sort files by name.
    pub fn sort(&mut self) {
        self.files.sort_keys();
    }
}

/// Serializes as `{file: {NAME: {value, type, line, arg}}}`.
impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.files.len()))?;
        for (file, config) in &self.files {
            map.serialize_entry(file, config)?;
        }
        map.end()
    }
}
