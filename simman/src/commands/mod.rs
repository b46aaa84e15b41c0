mod completions;
mod extract;
mod scan;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use extract::ExtractCommand;
use scan::ScanCommand;
use simman_core::Settings;

/// Extension trait for exiting on settings errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for simman_core::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Load settings from `--config`, or from `simman.toml` in the directory.
pub(crate) fn load_settings(dir: &Path, config: Option<&PathBuf>) -> simman_core::Result<Settings> {
    match config {
        Some(path) => Settings::open(path),
        None => Settings::load(dir),
    }
}

#[derive(Parser)]
#[command(name = "simman")]
#[command(version)]
#[command(about = "Turn hard-coded constants in Python scripts into command-line flags")]
pub(crate) struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Extract(cmd) => cmd.run(),
            Commands::Scan(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite scripts to take their constants as flags and write the launcher
    Extract(ExtractCommand),

    /// List module-level bindings without modifying anything
    Scan(ScanCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract_flags() {
        let cli = Cli::try_parse_from(["simman", "extract", "sims", "--dry-run", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Extract(_)));
    }
}
