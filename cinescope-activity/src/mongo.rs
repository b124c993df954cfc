//! MongoDB-backed activity store.
//!
//! Search documents look like
//! `{query_type, parameters: {...}, result_count, timestamp}` and error
//! documents like `{source, message, timestamp}`. Reads go through
//! aggregation pipelines grouped on `{query_type, parameters}`.

use chrono::{DateTime, Utc};
use cinescope_catalog::{ParamValue, QueryType, SearchQuery};
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::sync::{Client, Collection};

use crate::entry::{ErrorLogEntry, ErrorRecord, QueryFrequency, RecentQuery, SearchLogEntry};
use crate::error::ActivityError;
use crate::store::ActivityStore;

pub const DEFAULT_QUERIES_COLLECTION: &str = "search_queries";
pub const DEFAULT_ERRORS_COLLECTION: &str = "errors";

/// Names of the two collections inside the activity database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionNames {
    pub queries: String,
    pub errors: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            queries: DEFAULT_QUERIES_COLLECTION.to_string(),
            errors: DEFAULT_ERRORS_COLLECTION.to_string(),
        }
    }
}

pub struct MongoActivityStore {
    queries: Collection<Document>,
    errors: Collection<Document>,
}

impl MongoActivityStore {
    /// Create a client for `uri` and bind the two collections of `database`.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first read or write rather than here.
    pub fn connect(
        uri: &str,
        database: &str,
        collections: &CollectionNames,
    ) -> Result<Self, ActivityError> {
        let client = Client::with_uri_str(uri)?;
        let db = client.database(database);
        log::debug!(
            "Activity store bound to {}.{{{}, {}}}",
            database,
            collections.queries,
            collections.errors
        );
        Ok(Self {
            queries: db.collection(&collections.queries),
            errors: db.collection(&collections.errors),
        })
    }
}

impl ActivityStore for MongoActivityStore {
    fn insert_search(&self, entry: &SearchLogEntry) -> Result<(), ActivityError> {
        self.queries.insert_one(search_document(entry)).run()?;
        Ok(())
    }

    fn insert_error(&self, entry: &ErrorLogEntry) -> Result<(), ActivityError> {
        self.errors.insert_one(error_document(entry)).run()?;
        Ok(())
    }

    fn most_frequent_queries(&self, limit: usize) -> Result<Vec<QueryFrequency>, ActivityError> {
        let cursor = self.queries.aggregate(most_frequent_pipeline(limit)).run()?;
        let mut rows = Vec::new();
        for doc in cursor {
            match frequency_from_document(&doc?) {
                Ok(row) => rows.push(row),
                Err(e) => log::warn!("Skipping query group: {}", e),
            }
        }
        Ok(rows)
    }

    fn recent_unique_queries(&self, limit: usize) -> Result<Vec<RecentQuery>, ActivityError> {
        let cursor = self.queries.aggregate(recent_unique_pipeline(limit)).run()?;
        let mut rows = Vec::new();
        for doc in cursor {
            match recent_from_document(&doc?) {
                Ok(row) => rows.push(row),
                Err(e) => log::warn!("Skipping query group: {}", e),
            }
        }
        Ok(rows)
    }

    fn recent_errors(&self, limit: usize) -> Result<Vec<ErrorRecord>, ActivityError> {
        let cursor = self
            .errors
            .find(doc! {})
            .sort(doc! { "timestamp": -1 })
            .limit(limit_value(limit))
            .run()?;
        let mut rows = Vec::new();
        for doc in cursor {
            rows.push(error_from_document(&doc?));
        }
        Ok(rows)
    }
}

// ── Pipelines ───────────────────────────────────────────────────────────────

fn limit_value(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn group_key() -> Document {
    doc! { "query_type": "$query_type", "parameters": "$parameters" }
}

/// `$group` by query, count runs, keep the latest timestamp, most runs first.
pub fn most_frequent_pipeline(limit: usize) -> Vec<Document> {
    let limit = limit_value(limit);
    vec![
        doc! {
            "$group": {
                "_id": group_key(),
                "count": { "$sum": 1 },
                "last_used": { "$max": "$timestamp" },
            }
        },
        doc! { "$sort": { "count": -1, "last_used": -1 } },
        doc! { "$limit": limit },
    ]
}

/// `$group` by query, keep the latest timestamp, newest first.
pub fn recent_unique_pipeline(limit: usize) -> Vec<Document> {
    let limit = limit_value(limit);
    vec![
        doc! {
            "$group": {
                "_id": group_key(),
                "timestamp": { "$max": "$timestamp" },
            }
        },
        doc! { "$sort": { "timestamp": -1 } },
        doc! { "$limit": limit },
    ]
}

// ── Document conversion ─────────────────────────────────────────────────────

fn to_bson_datetime(ts: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(ts.timestamp_millis())
}

fn from_bson_datetime(ts: &bson::DateTime) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(ts.timestamp_millis())
}

fn param_to_bson(value: &ParamValue) -> Bson {
    match value {
        ParamValue::Text(s) => Bson::String(s.clone()),
        ParamValue::Year(y) => Bson::Int32(*y),
    }
}

fn param_from_bson(value: &Bson) -> Option<ParamValue> {
    match value {
        Bson::String(s) => Some(ParamValue::Text(s.clone())),
        Bson::Int32(v) => Some(ParamValue::Year(*v)),
        Bson::Int64(v) => i32::try_from(*v).ok().map(ParamValue::Year),
        _ => None,
    }
}

fn count_from_bson(value: &Bson) -> Option<u64> {
    match value {
        Bson::Int32(v) => u64::try_from(*v).ok(),
        Bson::Int64(v) => u64::try_from(*v).ok(),
        Bson::Double(v) if *v >= 0.0 && v.fract() == 0.0 => Some(*v as u64),
        _ => None,
    }
}

pub fn search_document(entry: &SearchLogEntry) -> Document {
    let mut parameters = Document::new();
    for (name, value) in entry.query.parameters() {
        parameters.insert(name, param_to_bson(&value));
    }
    let result_count = i64::try_from(entry.result_count).unwrap_or(i64::MAX);
    doc! {
        "query_type": entry.query.query_type().as_str(),
        "parameters": parameters,
        "result_count": result_count,
        "timestamp": to_bson_datetime(entry.timestamp),
    }
}

pub fn error_document(entry: &ErrorLogEntry) -> Document {
    doc! {
        "source": entry.source.as_str(),
        "message": entry.message.as_str(),
        "timestamp": to_bson_datetime(entry.timestamp),
    }
}

/// Rebuild a query from a `{query_type, parameters}` group key.
pub fn query_from_key(key: &Document) -> Result<SearchQuery, ActivityError> {
    let query_type: QueryType = key
        .get_str("query_type")
        .map_err(|e| ActivityError::malformed(format!("query_type: {}", e)))?
        .parse()
        .map_err(|e| ActivityError::malformed(format!("{}", e)))?;
    let parameters = key
        .get_document("parameters")
        .map_err(|e| ActivityError::malformed(format!("parameters: {}", e)))?;
    SearchQuery::from_parts(query_type, |name| {
        parameters.get(name).and_then(param_from_bson)
    })
    .ok_or_else(|| {
        ActivityError::malformed(format!(
            "unexpected parameters for {}: {}",
            query_type, parameters
        ))
    })
}

fn group_id(doc: &Document) -> Result<&Document, ActivityError> {
    doc.get_document("_id")
        .map_err(|e| ActivityError::malformed(format!("_id: {}", e)))
}

fn timestamp_field(doc: &Document, field: &str) -> Result<DateTime<Utc>, ActivityError> {
    doc.get_datetime(field)
        .ok()
        .and_then(from_bson_datetime)
        .ok_or_else(|| ActivityError::malformed(format!("missing or invalid {}", field)))
}

pub fn frequency_from_document(doc: &Document) -> Result<QueryFrequency, ActivityError> {
    let query = query_from_key(group_id(doc)?)?;
    let count = doc
        .get("count")
        .and_then(count_from_bson)
        .ok_or_else(|| ActivityError::malformed("missing or invalid count"))?;
    let last_used = timestamp_field(doc, "last_used")?;
    Ok(QueryFrequency {
        query,
        count,
        last_used,
    })
}

pub fn recent_from_document(doc: &Document) -> Result<RecentQuery, ActivityError> {
    let query = query_from_key(group_id(doc)?)?;
    let timestamp = timestamp_field(doc, "timestamp")?;
    Ok(RecentQuery { query, timestamp })
}

/// Read an error document leniently: a legacy `function` field stands in
/// for `source`, and anything missing falls back to a placeholder.
pub fn error_from_document(doc: &Document) -> ErrorRecord {
    let source = doc
        .get_str("source")
        .or_else(|_| doc.get_str("function"))
        .unwrap_or("unknown")
        .to_string();
    let message = match doc.get("message") {
        Some(Bson::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    let timestamp = doc.get_datetime("timestamp").ok().and_then(from_bson_datetime);
    ErrorRecord {
        source,
        message,
        timestamp,
    }
}

#[cfg(test)]
#[path = "tests/mongo_tests.rs"]
mod tests;
