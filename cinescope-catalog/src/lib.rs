//! Film catalog data model and operator input validation.
//!
//! This crate has no storage dependencies. The database layer fills these
//! types, the activity log records [`SearchQuery`] values, and the command
//! loop validates operator input through [`validate`] before any query runs.

pub mod types;
pub mod validate;

pub use types::*;
pub use validate::{MAX_YEAR_DIGITS, ValidationError, YearBound};
