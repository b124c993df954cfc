//! Read queries for the film catalog.
//!
//! Every string argument is bound as a parameter, never spliced into SQL.
//! Paginated searches return at most [`PAGE_SIZE`] rows starting at `offset`.

use cinescope_catalog::types::*;
use rusqlite::{Connection, params};
use thiserror::Error;

/// Rows returned by one paginated query call.
pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

fn like_pattern(term: &str) -> String {
    format!("%{}%", term)
}

// ── Film Searches ───────────────────────────────────────────────────────────

/// Films whose title contains `keyword`, ordered by title.
pub fn films_by_title(
    conn: &Connection,
    keyword: &str,
    offset: u32,
) -> Result<Vec<FilmRow>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT film_id, title, CAST(release_year AS INTEGER), rating, length
         FROM film
         WHERE title LIKE ?1
         ORDER BY title, film_id
         LIMIT ?2 OFFSET ?3",
    )?;
    let rows = stmt.query_map(params![like_pattern(keyword), PAGE_SIZE, offset], |row| {
        Ok(FilmRow {
            film_id: row.get(0)?,
            title: row.get(1)?,
            release_year: row.get(2)?,
            rating: row.get(3)?,
            length: row.get(4)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Films in `genre` released between `year_start` and `year_end` inclusive,
/// ordered by year then title.
pub fn films_by_genre_and_years(
    conn: &Connection,
    genre: &str,
    year_start: i32,
    year_end: i32,
    offset: u32,
) -> Result<Vec<GenreFilmRow>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT f.film_id, f.title, CAST(f.release_year AS INTEGER), c.name
         FROM film AS f
         JOIN film_category AS fc ON f.film_id = fc.film_id
         JOIN category AS c ON fc.category_id = c.category_id
         WHERE c.name = ?1
           AND CAST(f.release_year AS INTEGER) BETWEEN ?2 AND ?3
         ORDER BY CAST(f.release_year AS INTEGER), f.title, f.film_id
         LIMIT ?4 OFFSET ?5",
    )?;
    let rows = stmt.query_map(
        params![genre, year_start, year_end, PAGE_SIZE, offset],
        |row| {
            Ok(GenreFilmRow {
                film_id: row.get(0)?,
                title: row.get(1)?,
                release_year: row.get(2)?,
                genre: row.get(3)?,
            })
        },
    )?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Films featuring an actor whose "FIRST LAST" name contains `actor_name`,
/// case-insensitively. Newest films first, then by title.
pub fn films_by_actor(
    conn: &Connection,
    actor_name: &str,
    offset: u32,
) -> Result<Vec<ActorFilmRow>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT f.title, CAST(f.release_year AS INTEGER), a.first_name || ' ' || a.last_name
         FROM film AS f
         JOIN film_actor AS fa ON f.film_id = fa.film_id
         JOIN actor AS a ON fa.actor_id = a.actor_id
         WHERE UPPER(a.first_name || ' ' || a.last_name) LIKE ?1
         ORDER BY CAST(f.release_year AS INTEGER) DESC, f.title, a.actor_id
         LIMIT ?2 OFFSET ?3",
    )?;
    let pattern = like_pattern(&actor_name.trim().to_ascii_uppercase());
    let rows = stmt.query_map(params![pattern, PAGE_SIZE, offset], |row| {
        Ok(ActorFilmRow {
            title: row.get(0)?,
            release_year: row.get(1)?,
            actor: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Films whose description contains `keyword`, ordered by title.
pub fn films_by_description(
    conn: &Connection,
    keyword: &str,
    offset: u32,
) -> Result<Vec<DescriptionFilmRow>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT title, CAST(release_year AS INTEGER), description
         FROM film
         WHERE description LIKE ?1
         ORDER BY title, film_id
         LIMIT ?2 OFFSET ?3",
    )?;
    let rows = stmt.query_map(params![like_pattern(keyword), PAGE_SIZE, offset], |row| {
        Ok(DescriptionFilmRow {
            title: row.get(0)?,
            release_year: row.get(1)?,
            description: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Catalog Facts ───────────────────────────────────────────────────────────

/// Distinct genre names, alphabetically.
pub fn list_genres(conn: &Connection) -> Result<Vec<String>, QueryError> {
    let mut stmt = conn.prepare("SELECT DISTINCT name FROM category ORDER BY name")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Earliest and latest release year, or `None` if no film has a year.
pub fn release_year_range(conn: &Connection) -> Result<Option<YearRange>, QueryError> {
    let (min, max): (Option<i32>, Option<i32>) = conn.query_row(
        "SELECT MIN(CAST(release_year AS INTEGER)), MAX(CAST(release_year AS INTEGER))
         FROM film
         WHERE release_year IS NOT NULL",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok(match (min, max) {
        (Some(min), Some(max)) => Some(YearRange::new(min, max)),
        _ => None,
    })
}

/// Film counts per release year, in year order.
pub fn film_counts_by_year(conn: &Connection) -> Result<Vec<YearCount>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT CAST(release_year AS INTEGER) AS year, COUNT(*)
         FROM film
         GROUP BY year
         ORDER BY year",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(YearCount {
            release_year: row.get(0)?,
            film_count: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
