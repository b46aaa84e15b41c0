use std::{io::IsTerminal, path::PathBuf};

use clap::Args;
use dialoguer::{Confirm, theme::ColorfulTheme};
use eyre::{Context, Result};

use super::{UnwrapOrExit, load_settings};
use crate::{
    ops::{self, ExtractOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExtractCommand {
    /// Directory containing the Python scripts
    pub dir: PathBuf,

    /// Path to simman.toml (defaults to <DIR>/simman.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show what would change without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Rewrite without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

impl ExtractCommand {
    pub fn run(&self) -> Result<()> {
        let settings = load_settings(&self.dir, self.config.as_ref()).unwrap_or_exit();
        tracing::debug!(dir = %self.dir.display(), dry_run = self.dry_run, "running extract");

        if !self.dry_run && !self.yes && std::io::stdin().is_terminal() && !self.confirm()? {
            println!("Aborted; no files were changed.");
            return Ok(());
        }

        let report = ops::extract(
            &self.dir,
            &settings,
            ExtractOptions {
                dry_run: self.dry_run,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }

    fn confirm(&self) -> Result<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Rewrite the Python scripts in {} in place?",
                self.dir.display()
            ))
            .default(false)
            .interact()
            .wrap_err("Failed to read confirmation")
    }
}
