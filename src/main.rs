mod cli;
mod commands;
mod config;
mod constants;
mod error;
mod index;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    // Exit codes:
    // 0 = success
    // 1 = warnings only (e.g. validation issues)
    // 2 = errors present
    let exit_code = match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            ui::error(&format!("{:#}", e));
            2
        }
    };
    std::process::exit(exit_code);
}

fn run(command: Commands) -> anyhow::Result<i32> {
    match command {
        Commands::Resolve {
            version,
            loader,
            json,
        } => commands::resolve::resolve(&version, &loader, json),
        Commands::List => commands::list::list().map(|()| 0),
        Commands::Validate { json } => commands::validate::validate(json),
    }
}

/// RUST_LOG takes precedence over -v flags
fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
