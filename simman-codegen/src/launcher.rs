//! The interactive launcher script written next to the processed scripts.

use std::path::{Path, PathBuf};

use simman_core::{FileRules, GeneratedFile};
use simman_ir::Manifest;

use crate::{builder::CodeBuilder, generation::ImportCollector, literal::to_python_literal};

/// Runtime half of the launcher; `CONFIG` is defined above it.
const LAUNCHER_RUNTIME: &str = r#"BASE_DIR = os.path.dirname(os.path.abspath(__file__))
TRUE_WORDS = ("true", "1", "yes", "y")
FALSE_WORDS = ("false", "0", "no", "n")


def find_python():
    """Prefer the project's virtual environment over the current interpreter."""
    candidates = [
        os.path.join(BASE_DIR, ".venv", "bin", "python"),
        os.path.join(BASE_DIR, ".venv", "Scripts", "python.exe"),
    ]
    for candidate in candidates:
        if os.path.isfile(candidate) and os.access(candidate, os.X_OK):
            return candidate
    return sys.executable


def convert(raw, kind):
    if kind == "bool":
        word = raw.strip().lower()
        if word in TRUE_WORDS:
            return True
        if word in FALSE_WORDS:
            return False
        raise ValueError(raw)
    if kind == "int":
        return int(raw)
    if kind == "float":
        return float(raw)
    return raw


def format_arg(value, kind):
    if kind == "bool":
        return "true" if value else "false"
    return str(value)


def choose_script(scripts, preselect=None):
    if preselect is not None:
        if preselect in scripts:
            return preselect
        if preselect.isdigit() and 1 <= int(preselect) <= len(scripts):
            return scripts[int(preselect) - 1]
        print(f"Unknown script: {preselect}")

    print("Available scripts:")
    for index, name in enumerate(scripts, start=1):
        print(f"  {index}. {name} ({len(CONFIG[name])} configurable variables)")

    while True:
        try:
            choice = input("Select a script (number, or q to quit): ").strip()
        except EOFError:
            return None
        if choice.lower() == "q":
            return None
        if choice.isdigit() and 1 <= int(choice) <= len(scripts):
            return scripts[int(choice) - 1]
        print("Invalid selection.")


def prompt_overrides(entries):
    """Ask for each value; only values that differ from the default are passed on."""
    overrides = []
    for name, entry in sorted(entries.items(), key=lambda item: item[1]["line"]):
        default = entry["value"]
        kind = entry["type"]
        try:
            raw = input(f"{name} ({kind}) [{default}]: ").strip()
        except EOFError:
            raw = ""
        if not raw:
            continue
        try:
            value = convert(raw, kind)
        except ValueError:
            print(f"  Invalid {kind} value {raw!r}, keeping {default!r}")
            continue
        if value != default:
            overrides.extend([entry["arg"], format_arg(value, kind)])
    return overrides


def build_command(python, script, overrides):
    return [python, os.path.join(BASE_DIR, script)] + overrides


def main(argv):
    scripts = sorted(CONFIG)
    if not scripts:
        print("No configurable scripts found.")
        return 0

    preselect = argv[1] if len(argv) > 1 else None
    script = choose_script(scripts, preselect)
    if script is None:
        return 0

    overrides = prompt_overrides(CONFIG[script])
    command = build_command(find_python(), script, overrides)
    print("Running: " + " ".join(command))
    try:
        completed = subprocess.run(command, cwd=BASE_DIR)
    except OSError as error:
        print(f"Failed to launch {script}: {error}", file=sys.stderr)
        return 1
    return completed.returncode


if __name__ == "__main__":
    sys.exit(main(sys.argv))
"#;

/// The generated `manager.py` (or the configured launcher name).
pub struct Launcher<'a> {
    manifest: &'a Manifest,
    file_name: &'a str,
}

impl<'a> Launcher<'a> {
    pub fn new(manifest: &'a Manifest, file_name: &'a str) -> Self {
        Self {
            manifest,
            file_name,
        }
    }

    fn imports() -> ImportCollector {
        let mut imports = ImportCollector::new();
        imports.add_module("os");
        imports.add_module("subprocess");
        imports.add_module("sys");
        imports
    }
}

impl GeneratedFile for Launcher<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.file_name)
    }

    fn rules(&self) -> FileRules {
        FileRules { executable: true }
    }

    fn render(&self) -> String {
        // Manifest keys are always strings, so serialization cannot fail.
        let config = to_python_literal(self.manifest).unwrap_or_else(|_| "{}".to_string());

        CodeBuilder::python()
            .line("#!/usr/bin/env python3")
            .line("\"\"\"Interactive launcher for the configurable scripts in this directory.")
            .blank()
            .line("Generated by simman; run `simman extract` again to refresh it.")
            .line("\"\"\"")
            .each(Self::imports().lines(), |b, import| b.line(&import))
            .blank()
            .raw(&format!("CONFIG = {}\n", config))
            .blank()
            .raw(LAUNCHER_RUNTIME)
            .build()
    }
}
