// Command implementations for the CLI subcommands

pub mod list;
pub mod resolve;
pub mod validate;
