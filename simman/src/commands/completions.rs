use clap::{Args, CommandFactory};
use clap_complete::Shell;
use eyre::Result;

use super::Cli;

/// Print a shell completion script to stdout.
///
/// For bash: `simman completions bash > ~/.local/share/bash-completion/completions/simman`
#[derive(Args)]
pub struct CompletionsCommand {
    /// Target shell
    shell: Shell,
}

impl CompletionsCommand {
    pub fn run(&self) -> Result<()> {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(self.shell, &mut cmd, name, &mut std::io::stdout().lock());
        Ok(())
    }
}
