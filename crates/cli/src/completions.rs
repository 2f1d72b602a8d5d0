//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::Shell;

pub fn generate(shell: Shell) {
    let mut command = crate::Cli::command();
    clap_complete::generate(shell, &mut command, "noct", &mut std::io::stdout());
}
