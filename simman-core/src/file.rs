//! Whole-file writes for rewritten scripts and the launcher.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Something simman renders from scratch and writes into a directory.
pub trait GeneratedFile {
    /// Where the file goes inside `base`.
    fn path(&self, base: &Path) -> PathBuf;

    fn rules(&self) -> FileRules {
        FileRules::default()
    }

    fn render(&self) -> String;

    fn write(&self, base: &Path) -> Result<WriteResult> {
        File::new(self.path(base), self.render())
            .with_rules(self.rules())
            .write()
    }
}

/// How a write ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    Written,
    /// Written, and the executable bit was set.
    WrittenExecutable,
}

/// Per-file write options.
#[derive(Debug, Clone, Default)]
pub struct FileRules {
    /// Set mode `0o755` after writing. Failure only logs a warning.
    pub executable: bool,
}

/// Full content for one path. Writing replaces whatever is there.
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
    rules: FileRules,
}

impl File {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: FileRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn write(&self) -> Result<WriteResult> {
        write_file(&self.path, &self.content)?;
        let executable = self.rules.executable && set_executable(&self.path);
        Ok(if executable {
            WriteResult::WrittenExecutable
        } else {
            WriteResult::Written
        })
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| Error::io(path, e))?;
    Ok(())
}

#[cfg(unix)]
fn set_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    let mode = std::fs::Permissions::from_mode(0o755);
    if let Err(e) = std::fs::set_permissions(path, mode) {
        tracing::warn!(path = %path.display(), error = %e, "could not mark file executable");
        return false;
    }
    true
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sims").join("grid.py");

        write_file(&path, "WIDTH = 10\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "WIDTH = 10\n");
    }

    #[test]
    fn test_write_into_missing_dir_fails_with_io_error() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = write_file(&blocker.join("inner.py"), "x").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }

    #[test]
    fn test_file_write_plain() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.py");
        fs::write(&path, "original").unwrap();

        let file = File::new(&path, "updated");
        assert_eq!(file.write().unwrap(), WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_write_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("manager.py");

        let file = File::new(&path, "#!/usr/bin/env python3\n")
            .with_rules(FileRules { executable: true });
        assert_eq!(file.write().unwrap(), WriteResult::WrittenExecutable);

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_generated_file_write() {
        struct Hello;
        impl GeneratedFile for Hello {
            fn path(&self, base: &Path) -> PathBuf {
                base.join("hello.py")
            }
            fn render(&self) -> String {
                "print('hello')\n".to_string()
            }
        }

        let temp = TempDir::new().unwrap();
        Hello.write(temp.path()).unwrap();
        assert_eq!(
            fs::read_to_string(temp.path().join("hello.py")).unwrap(),
            "print('hello')\n"
        );
    }
}
