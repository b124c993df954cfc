use cinescope_activity::ActivityError;
use cinescope_db::SchemaError;
use cinescope_lib::ConfigError;
use thiserror::Error;

/// Errors that can end a cinescope run.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Terminal I/O failed
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Connection settings are incomplete or unreadable
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog database could not be opened
    #[error("Catalog error: {0}")]
    Catalog(#[from] SchemaError),

    /// Activity store client could not be created
    #[error("Activity store error: {0}")]
    Activity(#[from] ActivityError),
}
