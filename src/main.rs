use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use replay_driver::cli::{Cli, Commands, ConfigCommands};
use replay_driver::logging::init_logging;
use replay_driver::Config;

mod commands;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match dispatch(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    init_logging(cli.verbose, &config.log.level);

    match cli.command {
        Commands::Run(args) => commands::run::handle(&args, &config),
        Commands::Config(ConfigCommands::Show) => {
            commands::config::handle_show(&config)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config(ConfigCommands::Path) => {
            commands::config::handle_path(cli.config.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions { shell } => {
            commands::completions::handle(shell);
            Ok(ExitCode::SUCCESS)
        }
    }
}
