//! Activity log records and the aggregate rows read back from them.

use chrono::{DateTime, Utc};
use cinescope_catalog::SearchQuery;

/// One completed search, written once and never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLogEntry {
    pub query: SearchQuery,
    /// Total rows shown across every page the operator viewed.
    pub result_count: u64,
    pub timestamp: DateTime<Utc>,
}

impl SearchLogEntry {
    /// Stamp a search with the current time.
    pub fn new(query: SearchQuery, result_count: u64) -> Self {
        Self {
            query,
            result_count,
            timestamp: Utc::now(),
        }
    }
}

/// One recorded failure, written once and never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLogEntry {
    /// Name of the operation that failed.
    pub source: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorLogEntry {
    /// Stamp a failure with the current time.
    pub fn new(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A distinct query and how often it was run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFrequency {
    pub query: SearchQuery,
    pub count: u64,
    pub last_used: DateTime<Utc>,
}

/// A distinct query and when it was last run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentQuery {
    pub query: SearchQuery,
    pub timestamp: DateTime<Utc>,
}

/// An error as read back from the log.
///
/// Older documents may lack a source or a timestamp, so reading is lenient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub source: String,
    pub message: String,
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<ErrorLogEntry> for ErrorRecord {
    fn from(entry: ErrorLogEntry) -> Self {
        Self {
            source: entry.source,
            message: entry.message,
            timestamp: Some(entry.timestamp),
        }
    }
}
