//! Shell completions for the cbot CLI.
//!
//! Prints a completion script for bash, zsh, fish, elvish or `PowerShell` to
//! stdout, to be sourced from the shell's configuration.

use std::io;

use clap::CommandFactory;
use clap_complete::Shell;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

impl Command {
    pub fn run(self) {
        let mut cmd = super::Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(self.shell, &mut cmd, name, &mut io::stdout());
    }
}
