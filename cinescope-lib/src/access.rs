//! Guarded catalog access.
//!
//! The command loop never sees a raw database error. Every catalog call
//! goes through [`FilmCatalog`], whose production implementation turns a
//! failure into [`Lookup::Failed`] after telling the operator and recording
//! one error entry in the activity log.

use cinescope_activity::ActivityStore;
use cinescope_catalog::{
    ActorFilmRow, DescriptionFilmRow, FilmRow, GenreFilmRow, GenreList, YearCount, YearRange,
};
use cinescope_db::QueryError;
use rusqlite::Connection;

/// Outcome of a guarded catalog call.
///
/// `Found` may hold an empty collection; only `Failed` means the query
/// itself did not run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    Failed,
}

impl<T> Lookup<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, Lookup::Failed)
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::Failed => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(v) => Lookup::Found(f(v)),
            Lookup::Failed => Lookup::Failed,
        }
    }
}

/// Operation names recorded as the error source when a lookup fails.
pub mod source {
    pub const KEYWORD_SEARCH: &str = "search_films_by_keyword";
    pub const GENRE_YEAR_SEARCH: &str = "search_films_by_genre_and_years";
    pub const ACTOR_SEARCH: &str = "search_films_by_actor";
    pub const DESCRIPTION_SEARCH: &str = "search_films_by_description";
    pub const GENRES: &str = "get_all_genres";
    pub const YEAR_RANGE: &str = "get_release_year_range";
    pub const YEAR_COUNTS: &str = "get_film_count_by_year";
}

/// The catalog operations the command loop can run.
pub trait FilmCatalog {
    fn films_by_title(&self, keyword: &str, offset: u32) -> Lookup<Vec<FilmRow>>;

    fn films_by_genre_and_years(
        &self,
        genre: &str,
        year_start: i32,
        year_end: i32,
        offset: u32,
    ) -> Lookup<Vec<GenreFilmRow>>;

    fn films_by_actor(&self, actor_name: &str, offset: u32) -> Lookup<Vec<ActorFilmRow>>;

    fn films_by_description(&self, keyword: &str, offset: u32) -> Lookup<Vec<DescriptionFilmRow>>;

    fn genres(&self) -> Lookup<GenreList>;

    /// `Found(None)` when no film has a release year.
    fn release_year_range(&self) -> Lookup<Option<YearRange>>;

    fn film_counts_by_year(&self) -> Lookup<Vec<YearCount>>;
}

/// [`FilmCatalog`] over a live SQLite connection.
pub struct CatalogAccess<'a> {
    conn: &'a Connection,
    activity: &'a dyn ActivityStore,
}

impl<'a> CatalogAccess<'a> {
    pub fn new(conn: &'a Connection, activity: &'a dyn ActivityStore) -> Self {
        Self { conn, activity }
    }

    fn guard<T>(&self, source: &'static str, result: Result<T, QueryError>) -> Lookup<T> {
        match result {
            Ok(value) => Lookup::Found(value),
            Err(e) => {
                log::error!("Database query failed in {}: {}", source, e);
                self.activity.record_error(source, &e.to_string());
                Lookup::Failed
            }
        }
    }
}

impl FilmCatalog for CatalogAccess<'_> {
    fn films_by_title(&self, keyword: &str, offset: u32) -> Lookup<Vec<FilmRow>> {
        self.guard(
            source::KEYWORD_SEARCH,
            cinescope_db::films_by_title(self.conn, keyword, offset),
        )
    }

    fn films_by_genre_and_years(
        &self,
        genre: &str,
        year_start: i32,
        year_end: i32,
        offset: u32,
    ) -> Lookup<Vec<GenreFilmRow>> {
        self.guard(
            source::GENRE_YEAR_SEARCH,
            cinescope_db::films_by_genre_and_years(self.conn, genre, year_start, year_end, offset),
        )
    }

    fn films_by_actor(&self, actor_name: &str, offset: u32) -> Lookup<Vec<ActorFilmRow>> {
        self.guard(
            source::ACTOR_SEARCH,
            cinescope_db::films_by_actor(self.conn, actor_name, offset),
        )
    }

    fn films_by_description(&self, keyword: &str, offset: u32) -> Lookup<Vec<DescriptionFilmRow>> {
        self.guard(
            source::DESCRIPTION_SEARCH,
            cinescope_db::films_by_description(self.conn, keyword, offset),
        )
    }

    fn genres(&self) -> Lookup<GenreList> {
        self.guard(source::GENRES, cinescope_db::list_genres(self.conn))
            .map(GenreList::new)
    }

    fn release_year_range(&self) -> Lookup<Option<YearRange>> {
        self.guard(source::YEAR_RANGE, cinescope_db::release_year_range(self.conn))
    }

    fn film_counts_by_year(&self) -> Lookup<Vec<YearCount>> {
        self.guard(source::YEAR_COUNTS, cinescope_db::film_counts_by_year(self.conn))
    }
}

#[cfg(test)]
#[path = "tests/access_tests.rs"]
mod tests;
