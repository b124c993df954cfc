//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use cinescope_lib::Overrides;

#[derive(Parser)]
#[command(name = "cinescope")]
#[command(about = "Search a film catalog and review query activity", long_about = None)]
pub(crate) struct Cli {
    /// Catalog database file (overrides $CINESCOPE_CATALOG)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Activity store connection URI (overrides $MONGO_URI)
    #[arg(long, global = true)]
    pub store_uri: Option<String>,

    /// Activity store database name (overrides $MONGO_DB)
    #[arg(long, global = true)]
    pub store_name: Option<String>,

    /// More diagnostic output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only show errors on stderr
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Without a command, start the interactive console
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub(crate) fn overrides(&self) -> Overrides {
        Overrides {
            catalog: self.catalog.clone(),
            store_uri: self.store_uri.clone(),
            store_name: self.store_name.clone(),
        }
    }

    pub(crate) fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Inspect connection settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show each resolved setting and where it came from
    Show,
    /// Print the settings file path
    Path,
}

#[cfg(test)]
#[path = "tests/cli_types_tests.rs"]
mod tests;
