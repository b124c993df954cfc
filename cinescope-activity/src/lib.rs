//! Activity log for cinescope: one record per completed search and one per
//! failure, plus the aggregate reads behind the statistics menu.
//!
//! [`MongoActivityStore`] is the production store; [`MemoryActivityStore`]
//! keeps records in process with the same semantics.

pub mod entry;
pub mod error;
pub mod memory;
pub mod mongo;
pub mod store;

pub use entry::{ErrorLogEntry, ErrorRecord, QueryFrequency, RecentQuery, SearchLogEntry};
pub use error::ActivityError;
pub use memory::MemoryActivityStore;
pub use mongo::{CollectionNames, MongoActivityStore};
pub use store::{ActivityStore, DEFAULT_REPORT_LIMIT, RECORD_SEARCH_SOURCE};
