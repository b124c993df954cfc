//! Opening the catalog database and checking its shape.
//!
//! The catalog is owned by another system; this crate only reads it. The
//! schema SQL below mirrors the Sakila tables we query and exists so tests
//! (and local demos) can build a catalog from scratch.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Catalog database not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Catalog is missing required table '{0}'")]
    MissingTable(String),
}

/// Tables every catalog must provide.
pub const REQUIRED_TABLES: &[&str] = &["film", "category", "film_category", "actor", "film_actor"];

/// Open an existing catalog database read-only and verify its tables.
pub fn open_catalog(path: &Path) -> Result<Connection, SchemaError> {
    if !path.exists() {
        return Err(SchemaError::NotFound(path.to_path_buf()));
    }
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    verify_schema(&conn)?;
    log::debug!("Opened catalog database at {}", path.display());
    Ok(conn)
}

/// Open an in-memory catalog with the full schema and no rows. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Create the catalog tables if they don't exist.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Check that every table in [`REQUIRED_TABLES`] exists.
pub fn verify_schema(conn: &Connection) -> Result<(), SchemaError> {
    for table in REQUIRED_TABLES {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
            [table],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(SchemaError::MissingTable(table.to_string()));
        }
    }
    Ok(())
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS actor (
    actor_id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS category (
    category_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS film (
    film_id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    release_year INTEGER,
    length INTEGER,
    rating TEXT DEFAULT 'G'
);

CREATE TABLE IF NOT EXISTS film_actor (
    actor_id INTEGER NOT NULL REFERENCES actor(actor_id),
    film_id INTEGER NOT NULL REFERENCES film(film_id),
    PRIMARY KEY (actor_id, film_id)
);

CREATE TABLE IF NOT EXISTS film_category (
    film_id INTEGER NOT NULL REFERENCES film(film_id),
    category_id INTEGER NOT NULL REFERENCES category(category_id),
    PRIMARY KEY (film_id, category_id)
);

CREATE INDEX IF NOT EXISTS idx_film_title ON film(title);
CREATE INDEX IF NOT EXISTS idx_film_actor_film ON film_actor(film_id);
CREATE INDEX IF NOT EXISTS idx_film_category_category ON film_category(category_id);
"#;
