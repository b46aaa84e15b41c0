use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};

use super::{UnwrapOrExit, load_settings};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ScanCommand {
    /// Directory containing the Python scripts
    pub dir: PathBuf,

    /// Path to simman.toml (defaults to <DIR>/simman.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the manifest as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ScanCommand {
    pub fn run(&self) -> Result<()> {
        let settings = load_settings(&self.dir, self.config.as_ref()).unwrap_or_exit();
        let report = ops::scan(&self.dir, &settings)?;

        if self.json {
            let json = serde_json::to_string_pretty(&report.manifest)
                .wrap_err("Failed to serialize manifest")?;
            println!("{}", json);
        } else {
            report.render(&mut TerminalOutput::new());
        }

        Ok(())
    }
}
