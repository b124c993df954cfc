//! SQLite access to the film catalog.
//!
//! Provides read-only opening of a Sakila-shaped catalog database and the
//! paginated search and lookup queries the command loop runs against it
//! (via rusqlite with bundled feature).

pub mod queries;
pub mod schema;

pub use queries::{
    PAGE_SIZE, QueryError, film_counts_by_year, films_by_actor, films_by_description,
    films_by_genre_and_years, films_by_title, list_genres, release_year_range,
};
pub use schema::{REQUIRED_TABLES, SchemaError, open_catalog, open_memory};
