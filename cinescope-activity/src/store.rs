//! The activity store interface and its best-effort recording policy.

use cinescope_catalog::SearchQuery;

use crate::entry::{ErrorLogEntry, ErrorRecord, QueryFrequency, RecentQuery, SearchLogEntry};
use crate::error::ActivityError;

/// Number of rows the statistics reports show.
pub const DEFAULT_REPORT_LIMIT: usize = 5;

/// Source tag used when a search record itself could not be written.
pub const RECORD_SEARCH_SOURCE: &str = "record_search";

/// Append-only storage for search and error records, plus the three
/// aggregate reads the statistics menu needs.
///
/// Implementors provide the fallible primitives. Callers normally use
/// [`record_search`](ActivityStore::record_search) and
/// [`record_error`](ActivityStore::record_error), which never fail.
pub trait ActivityStore {
    fn insert_search(&self, entry: &SearchLogEntry) -> Result<(), ActivityError>;

    fn insert_error(&self, entry: &ErrorLogEntry) -> Result<(), ActivityError>;

    /// Distinct queries ranked by how often they ran, most frequent first.
    /// Ties go to the most recently used.
    fn most_frequent_queries(&self, limit: usize) -> Result<Vec<QueryFrequency>, ActivityError>;

    /// Distinct queries ranked by their latest run, newest first.
    fn recent_unique_queries(&self, limit: usize) -> Result<Vec<RecentQuery>, ActivityError>;

    /// Error records, newest first.
    fn recent_errors(&self, limit: usize) -> Result<Vec<ErrorRecord>, ActivityError>;

    /// Record a completed search. A failed write is reported through one
    /// [`record_error`](ActivityStore::record_error) call and otherwise dropped.
    fn record_search(&self, query: &SearchQuery, result_count: u64) {
        let entry = SearchLogEntry::new(query.clone(), result_count);
        if let Err(e) = self.insert_search(&entry) {
            log::warn!("Could not record {} search: {}", query.query_type(), e);
            self.record_error(RECORD_SEARCH_SOURCE, &e.to_string());
        }
    }

    /// Record a failure. A failed write is dropped unconditionally.
    fn record_error(&self, source: &str, message: &str) {
        let entry = ErrorLogEntry::new(source, message);
        if let Err(e) = self.insert_error(&entry) {
            log::debug!("Dropped error record from {}: {}", source, e);
        }
    }
}
