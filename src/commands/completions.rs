//! Shell completion generation

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use replay_driver::cli::Cli;

/// Print completions for `shell` to stdout.
pub fn handle(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
