//! cinescope CLI
//!
//! Interactive console for searching a film catalog and reviewing the
//! search and error activity it records.

mod cli_types;
mod commands;
mod error;

use std::process::ExitCode;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::config::{run_config_path, run_config_show};
use commands::console::run_console;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.log_level());
    let overrides = cli.overrides();

    match cli.command {
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => run_config_show(&overrides),
            ConfigAction::Path => run_config_path(),
        },
        None => run_console(&overrides),
    }
}

/// Diagnostics go to stderr. `RUST_LOG` overrides the level from flags.
fn init_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env()
        .init();
}
