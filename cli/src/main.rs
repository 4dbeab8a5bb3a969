mod call;
mod classify;
mod cli;
mod error;
mod init;
mod logging;
mod normalize;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init { force } => init::execute(&cli.config, force),
        Commands::Classify { message } => classify::execute(&message, cli.verbose),
        Commands::Normalize { file, status } => normalize::execute(&file, status),
        Commands::Call {
            method,
            path,
            body,
            public,
        } => call::execute(call::CallArgs {
            config_path: cli.config.clone(),
            method,
            path,
            body,
            public,
        }),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "Error:".bold().red(), err.user_message());
        process::exit(1);
    }
}
