//! The four film searches and their paging loop.
//!
//! A search validates its input, then shows results a page at a time until
//! the operator stops or the results run out. Only a search that reaches
//! that point is recorded, with the number of rows actually shown.

use std::io::{self, BufRead, Write};

use cinescope_catalog::{SearchQuery, ValidationError, YearBound, validate};
use cinescope_db::PAGE_SIZE;

use crate::access::Lookup;
use crate::display;
use crate::session::Session;

pub const MORE_PROMPT: &str = "Show the next 10? (y/n): ";

/// Error sources for failures caught by the search flows themselves.
pub mod source {
    pub const KEYWORD: &str = "keyword_search";
    pub const GENRE_YEAR: &str = "genre_year_search";
    pub const ACTOR: &str = "actor_search";
    pub const DESCRIPTION: &str = "description_search";
}

/// Position within one search's results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageCursor {
    pub offset: u32,
    /// Rows shown so far.
    pub shown: u64,
}

impl PageCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_first_page(&self) -> bool {
        self.offset == 0
    }

    /// Count a displayed page of `rows` rows.
    pub fn record_page(&mut self, rows: usize) {
        self.shown += rows as u64;
    }

    pub fn advance(&mut self) {
        self.offset += PAGE_SIZE;
    }
}

/// How a paged search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The operator stopped or results ran out after `shown` rows.
    Completed { shown: u64 },
    /// A page could not be fetched.
    Failed,
}

/// Messages for one kind of search.
struct SearchText {
    empty: &'static str,
    failed: &'static str,
}

const KEYWORD_TEXT: SearchText = SearchText {
    empty: "No results.",
    failed: "Search failed.",
};

const GENRE_YEAR_TEXT: SearchText = SearchText {
    empty: "No results.",
    failed: "Search failed.",
};

const ACTOR_TEXT: SearchText = SearchText {
    empty: "No films found.",
    failed: "Actor search failed.",
};

const DESCRIPTION_TEXT: SearchText = SearchText {
    empty: "Nothing found.",
    failed: "Description search failed.",
};

/// The operator-facing line for a rejected input.
pub fn validation_message(err: &ValidationError) -> String {
    match err {
        ValidationError::EmptyTerm => "Search term cannot be empty.".to_string(),
        ValidationError::UnknownGenre(_) => "Unknown genre.".to_string(),
        ValidationError::NotNumeric { .. } => "Error: year must be a number.".to_string(),
        ValidationError::TooManyDigits { .. } => "Year must have at most 4 digits.".to_string(),
        ValidationError::OutOfRange { bound, range, .. } => {
            format!("{} must be in the range {}.", bound, range)
        }
        ValidationError::EndBeforeStart { .. } => {
            format!("{} cannot be before the start year.", YearBound::End)
        }
    }
}

impl<R: BufRead, W: Write> Session<'_, R, W> {
    pub(crate) fn keyword_search(&mut self) -> io::Result<()> {
        let input = self.console.prompt("Enter a keyword to search: ")?;
        let Some(keyword) = self.validated(source::KEYWORD, validate::search_term(&input))? else {
            return Ok(());
        };

        let catalog = self.catalog;
        let outcome = self.paged(
            &KEYWORD_TEXT,
            |offset| catalog.films_by_title(&keyword, offset),
            display::film_table,
        )?;
        self.finish(source::KEYWORD, outcome, SearchQuery::Keyword { keyword });
        Ok(())
    }

    pub(crate) fn genre_year_search(&mut self) -> io::Result<()> {
        let genres = match self.catalog.genres() {
            Lookup::Found(genres) if genres.is_empty() => {
                self.console.warn(display::NO_GENRES)?;
                self.activity
                    .record_error(source::GENRE_YEAR, "catalog has no genres");
                return Ok(());
            }
            Lookup::Found(genres) => genres,
            Lookup::Failed => {
                self.console.warn("Could not load the genre list.")?;
                return Ok(());
            }
        };
        let range = match self.catalog.release_year_range() {
            Lookup::Found(Some(range)) => range,
            Lookup::Found(None) => {
                self.console.warn(display::NO_YEAR_RANGE)?;
                self.activity
                    .record_error(source::GENRE_YEAR, "catalog has no release years");
                return Ok(());
            }
            Lookup::Failed => {
                self.console.warn("Could not load the release year range.")?;
                return Ok(());
            }
        };

        self.console
            .say(&display::genre_overview(Some(&genres), Some(range)))?;
        self.console.blank()?;

        let genre_input = self.console.prompt("Enter a genre: ")?;
        let Some(genre) =
            self.validated(source::GENRE_YEAR, validate::genre(&genres, &genre_input))?
        else {
            return Ok(());
        };

        let start_input = self
            .console
            .prompt(&format!("Start year ({}): ", range))?;
        let end_input = self.console.prompt(&format!(
            "End year ({}), or Enter to search only {}: ",
            range, start_input
        ))?;
        let Some((year_start, year_end)) = self.validated(
            source::GENRE_YEAR,
            validate::year_bounds(&start_input, &end_input, range),
        )?
        else {
            return Ok(());
        };

        let catalog = self.catalog;
        let outcome = self.paged(
            &GENRE_YEAR_TEXT,
            |offset| catalog.films_by_genre_and_years(&genre, year_start, year_end, offset),
            display::genre_film_table,
        )?;
        self.finish(
            source::GENRE_YEAR,
            outcome,
            SearchQuery::GenreYear {
                genre,
                year_start,
                year_end,
            },
        );
        Ok(())
    }

    pub(crate) fn actor_search(&mut self) -> io::Result<()> {
        let input = self
            .console
            .prompt("Enter an actor's first name, last name or part of it: ")?;
        let Some(actor_name) = self.validated(source::ACTOR, validate::search_term(&input))? else {
            return Ok(());
        };

        let catalog = self.catalog;
        let outcome = self.paged(
            &ACTOR_TEXT,
            |offset| catalog.films_by_actor(&actor_name, offset),
            display::actor_film_table,
        )?;
        self.finish(source::ACTOR, outcome, SearchQuery::Actor { actor_name });
        Ok(())
    }

    pub(crate) fn description_search(&mut self) -> io::Result<()> {
        let input = self
            .console
            .prompt("Enter a keyword from the description: ")?;
        let Some(keyword) =
            self.validated(source::DESCRIPTION, validate::search_term(&input))?
        else {
            return Ok(());
        };

        let catalog = self.catalog;
        let outcome = self.paged(
            &DESCRIPTION_TEXT,
            |offset| catalog.films_by_description(&keyword, offset),
            display::description_film_table,
        )?;
        self.finish(source::DESCRIPTION, outcome, SearchQuery::Description { keyword });
        Ok(())
    }

    /// Unwrap a validation result, or report and record the rejection.
    fn validated<T>(
        &mut self,
        source: &str,
        result: Result<T, ValidationError>,
    ) -> io::Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                log::info!("Rejected {} input: {}", source, e);
                self.activity.record_error(source, &e.to_string());
                self.console.warn(&validation_message(&e))?;
                Ok(None)
            }
        }
    }

    /// Show pages from `fetch` until the operator stops or results run out.
    fn paged<T>(
        &mut self,
        text: &SearchText,
        fetch: impl Fn(u32) -> Lookup<Vec<T>>,
        render: fn(&[T]) -> String,
    ) -> io::Result<SearchOutcome> {
        let mut cursor = PageCursor::new();
        loop {
            let rows = match fetch(cursor.offset) {
                Lookup::Found(rows) => rows,
                Lookup::Failed => {
                    self.console.warn(text.failed)?;
                    return Ok(SearchOutcome::Failed);
                }
            };
            if rows.is_empty() {
                if cursor.is_first_page() {
                    self.console.say(text.empty)?;
                }
                break;
            }

            self.console.say(&render(&rows))?;
            cursor.record_page(rows.len());

            self.console.blank()?;
            if self.console.confirm(MORE_PROMPT)? {
                cursor.advance();
            } else {
                break;
            }
        }
        Ok(SearchOutcome::Completed {
            shown: cursor.shown,
        })
    }

    fn finish(&self, source: &str, outcome: SearchOutcome, query: SearchQuery) {
        match outcome {
            SearchOutcome::Completed { shown } => {
                log::debug!("{} finished with {} rows shown", source, shown);
                self.activity.record_search(&query, shown);
            }
            SearchOutcome::Failed => {
                log::warn!("{} aborted: {} lookup failed", source, query.query_type());
            }
        }
    }
}
