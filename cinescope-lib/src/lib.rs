//! The cinescope console: guarded catalog access, report rendering,
//! connection settings and the interactive menu session.

pub mod access;
pub mod chart;
pub mod console;
pub mod display;
pub mod search;
pub mod session;
pub mod settings;
pub mod stats;

pub use access::{CatalogAccess, FilmCatalog, Lookup};
pub use search::{PageCursor, SearchOutcome};
pub use session::Session;
pub use settings::{ConfigError, Overrides, SettingSource, Settings, SettingsFile};
