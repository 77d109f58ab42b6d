// CLI module for handling command-line interface

use crate::constants;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "langpack")]
#[command(about = "Resolve Minecraft mod language packs for a game version and loader")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show which packs to download for a Minecraft version
    Resolve {
        /// Minecraft version, e.g. 1.20.1
        version: String,
        /// Mod loader to prefer (case-insensitive)
        #[arg(short, long, default_value = constants::DEFAULT_LOADER)]
        loader: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the entries of the asset index
    List,
    /// Check the asset index for entries that cannot be resolved
    Validate {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
