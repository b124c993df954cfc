//! In-process activity store.
//!
//! Holds records in memory with the same aggregation semantics as the
//! MongoDB store. Writes can be switched to fail so callers' handling of an
//! unreachable store can be exercised.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use cinescope_catalog::SearchQuery;

use crate::entry::{ErrorLogEntry, ErrorRecord, QueryFrequency, RecentQuery, SearchLogEntry};
use crate::error::ActivityError;
use crate::store::ActivityStore;

#[derive(Debug, Default)]
pub struct MemoryActivityStore {
    searches: RefCell<Vec<SearchLogEntry>>,
    errors: RefCell<Vec<ErrorLogEntry>>,
    fail_search_writes: Cell<bool>,
    fail_error_writes: Cell<bool>,
    fail_reads: Cell<bool>,
}

impl MemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent search write fail (or succeed again).
    pub fn set_fail_search_writes(&self, fail: bool) {
        self.fail_search_writes.set(fail);
    }

    /// Make every subsequent error write fail (or succeed again).
    pub fn set_fail_error_writes(&self, fail: bool) {
        self.fail_error_writes.set(fail);
    }

    /// Make every subsequent aggregate read fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// All search records, in write order.
    pub fn searches(&self) -> Vec<SearchLogEntry> {
        self.searches.borrow().clone()
    }

    /// All error records, in write order.
    pub fn errors(&self) -> Vec<ErrorLogEntry> {
        self.errors.borrow().clone()
    }

    fn check_reads(&self) -> Result<(), ActivityError> {
        if self.fail_reads.get() {
            Err(ActivityError::unavailable("reads disabled"))
        } else {
            Ok(())
        }
    }

    /// Group searches by query as (query, run count, latest timestamp), in first-seen order.
    fn grouped(&self) -> Vec<(SearchQuery, u64, DateTime<Utc>)> {
        let searches = self.searches.borrow();
        let mut order: Vec<SearchQuery> = Vec::new();
        let mut groups: HashMap<&SearchQuery, (u64, DateTime<Utc>)> = HashMap::new();
        for entry in searches.iter() {
            match groups.get_mut(&entry.query) {
                Some((count, last)) => {
                    *count += 1;
                    if entry.timestamp > *last {
                        *last = entry.timestamp;
                    }
                }
                None => {
                    order.push(entry.query.clone());
                    groups.insert(&entry.query, (1, entry.timestamp));
                }
            }
        }
        order
            .into_iter()
            .map(|q| {
                let (count, last) = groups[&q];
                (q, count, last)
            })
            .collect()
    }
}

impl ActivityStore for MemoryActivityStore {
    fn insert_search(&self, entry: &SearchLogEntry) -> Result<(), ActivityError> {
        if self.fail_search_writes.get() {
            return Err(ActivityError::unavailable("search writes disabled"));
        }
        self.searches.borrow_mut().push(entry.clone());
        Ok(())
    }

    fn insert_error(&self, entry: &ErrorLogEntry) -> Result<(), ActivityError> {
        if self.fail_error_writes.get() {
            return Err(ActivityError::unavailable("error writes disabled"));
        }
        self.errors.borrow_mut().push(entry.clone());
        Ok(())
    }

    fn most_frequent_queries(&self, limit: usize) -> Result<Vec<QueryFrequency>, ActivityError> {
        self.check_reads()?;
        let mut groups = self.grouped();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.2.cmp(&a.2)));
        Ok(groups
            .into_iter()
            .take(limit)
            .map(|(query, count, last_used)| QueryFrequency {
                query,
                count,
                last_used,
            })
            .collect())
    }

    fn recent_unique_queries(&self, limit: usize) -> Result<Vec<RecentQuery>, ActivityError> {
        self.check_reads()?;
        let mut groups = self.grouped();
        groups.sort_by(|a, b| b.2.cmp(&a.2));
        Ok(groups
            .into_iter()
            .take(limit)
            .map(|(query, _, timestamp)| RecentQuery { query, timestamp })
            .collect())
    }

    fn recent_errors(&self, limit: usize) -> Result<Vec<ErrorRecord>, ActivityError> {
        self.check_reads()?;
        // Newest writes first so equal timestamps keep reverse write order.
        let mut errors: Vec<ErrorLogEntry> = self.errors.borrow().iter().rev().cloned().collect();
        errors.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(errors.into_iter().take(limit).map(ErrorRecord::from).collect())
    }
}

#[cfg(test)]
#[path = "tests/memory_tests.rs"]
mod tests;
