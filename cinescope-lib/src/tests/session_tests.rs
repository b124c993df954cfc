use std::cell::{Cell, RefCell};

use cinescope_activity::MemoryActivityStore;
use cinescope_catalog::{
    ActorFilmRow, DescriptionFilmRow, FilmRow, GenreFilmRow, GenreList, QueryType, SearchQuery,
    YearCount, YearRange,
};

use super::*;
use crate::access::Lookup;
use crate::chart::CHART_TITLE;
use crate::search::MORE_PROMPT;
use crate::stats::{CHART_UNAVAILABLE, STATS_UNAVAILABLE};

/// A catalog double serving canned rows ten at a time and remembering
/// every call it receives.
#[derive(Default)]
struct FakeCatalog {
    films: Vec<FilmRow>,
    genres: Vec<String>,
    range: Option<YearRange>,
    counts: Vec<YearCount>,
    fail: Cell<bool>,
    calls: RefCell<Vec<String>>,
}

impl FakeCatalog {
    fn with_films(films: Vec<FilmRow>) -> Self {
        Self {
            films,
            genres: vec!["Comedy".to_string(), "Sci-Fi".to_string()],
            range: Some(YearRange::new(1990, 2010)),
            counts: vec![
                YearCount {
                    release_year: Some(1999),
                    film_count: 1,
                },
                YearCount {
                    release_year: Some(2003),
                    film_count: 1,
                },
            ],
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn page<T: Clone>(&self, call: String, rows: Vec<T>, offset: u32) -> Lookup<Vec<T>> {
        self.calls.borrow_mut().push(call);
        if self.fail.get() {
            return Lookup::Failed;
        }
        Lookup::Found(rows.into_iter().skip(offset as usize).take(10).collect())
    }
}

impl FilmCatalog for FakeCatalog {
    fn films_by_title(&self, keyword: &str, offset: u32) -> Lookup<Vec<FilmRow>> {
        let rows = self
            .films
            .iter()
            .filter(|f| f.title.to_lowercase().contains(&keyword.to_lowercase()))
            .cloned()
            .collect();
        self.page(format!("title:{}@{}", keyword, offset), rows, offset)
    }

    fn films_by_genre_and_years(
        &self,
        genre: &str,
        year_start: i32,
        year_end: i32,
        offset: u32,
    ) -> Lookup<Vec<GenreFilmRow>> {
        let rows = self
            .films
            .iter()
            .filter(|f| f.release_year.is_some_and(|y| y >= year_start && y <= year_end))
            .map(|f| GenreFilmRow {
                film_id: f.film_id,
                title: f.title.clone(),
                release_year: f.release_year,
                genre: genre.to_string(),
            })
            .collect();
        self.page(
            format!("genre:{}:{}-{}@{}", genre, year_start, year_end, offset),
            rows,
            offset,
        )
    }

    fn films_by_actor(&self, actor_name: &str, offset: u32) -> Lookup<Vec<ActorFilmRow>> {
        self.page(format!("actor:{}@{}", actor_name, offset), Vec::new(), offset)
    }

    fn films_by_description(
        &self,
        keyword: &str,
        offset: u32,
    ) -> Lookup<Vec<DescriptionFilmRow>> {
        let rows = self
            .films
            .iter()
            .map(|f| DescriptionFilmRow {
                title: f.title.clone(),
                release_year: f.release_year,
                description: Some(format!("A story about {}", keyword)),
            })
            .collect();
        self.page(format!("description:{}@{}", keyword, offset), rows, offset)
    }

    fn genres(&self) -> Lookup<GenreList> {
        self.calls.borrow_mut().push("genres".to_string());
        Lookup::Found(GenreList::new(self.genres.clone()))
    }

    fn release_year_range(&self) -> Lookup<Option<YearRange>> {
        self.calls.borrow_mut().push("year_range".to_string());
        Lookup::Found(self.range)
    }

    fn film_counts_by_year(&self) -> Lookup<Vec<YearCount>> {
        self.calls.borrow_mut().push("year_counts".to_string());
        if self.fail.get() {
            return Lookup::Failed;
        }
        Lookup::Found(self.counts.clone())
    }
}

fn film(id: i64, title: &str, year: i32, rating: &str, length: i32) -> FilmRow {
    FilmRow {
        film_id: id,
        title: title.to_string(),
        release_year: Some(year),
        rating: Some(rating.to_string()),
        length: Some(length),
    }
}

fn matrix_catalog() -> FakeCatalog {
    FakeCatalog::with_films(vec![
        film(1, "The Matrix", 1999, "R", 136),
        film(2, "Matrix Reloaded", 2003, "R", 138),
    ])
}

fn clone_catalog(n: i64) -> FakeCatalog {
    FakeCatalog::with_films(
        (0..n)
            .map(|i| film(100 + i, &format!("Clone {:02}", i), 2000, "PG", 90))
            .collect(),
    )
}

/// Run a session over `script` and return its output without styling.
fn run(catalog: &FakeCatalog, activity: &MemoryActivityStore, script: &str) -> String {
    let mut session = Session::new(catalog, activity, script.as_bytes(), Vec::new());
    session.run().unwrap();
    strip_ansi_escapes::strip_str(String::from_utf8(session.into_output()).unwrap())
}

#[test]
fn keyword_search_logs_total_and_renders_table() {
    let catalog = matrix_catalog();
    let activity = MemoryActivityStore::new();
    let out = run(&catalog, &activity, "1\n1\nmatrix\nn\n0\n0\n");

    assert!(out.contains("| Title           | Year | Rating | Length (min) |"));
    assert!(out.contains("| The Matrix      | 1999 | R      |          136 |"));
    assert!(out.contains("| Matrix Reloaded | 2003 | R      |          138 |"));

    let searches = activity.searches();
    assert_eq!(searches.len(), 1);
    assert_eq!(
        searches[0].query,
        SearchQuery::Keyword {
            keyword: "matrix".to_string()
        }
    );
    assert_eq!(searches[0].result_count, 2);
    assert!(out.ends_with("Goodbye!\n"));
}

#[test]
fn logged_count_is_rows_shown_not_pages_requested() {
    let catalog = clone_catalog(25);
    let activity = MemoryActivityStore::new();
    run(&catalog, &activity, "1\n1\nclone\ny\ny\ny\n0\n0\n");

    assert_eq!(
        catalog.calls(),
        vec!["title:clone@0", "title:clone@10", "title:clone@20", "title:clone@30"]
    );
    let searches = activity.searches();
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].result_count, 25);
}

#[test]
fn declining_more_stops_after_first_page() {
    let catalog = clone_catalog(25);
    let activity = MemoryActivityStore::new();
    let out = run(&catalog, &activity, "1\n1\nclone\nN\n0\n0\n");

    assert_eq!(catalog.calls(), vec!["title:clone@0"]);
    assert_eq!(out.matches(MORE_PROMPT).count(), 1);
    assert_eq!(activity.searches()[0].result_count, 10);
}

#[test]
fn empty_first_page_reports_and_logs_zero() {
    let catalog = matrix_catalog();
    let activity = MemoryActivityStore::new();
    let out = run(&catalog, &activity, "1\n3\nnobody\n0\n0\n");

    assert!(out.contains("No films found."));
    assert!(!out.contains(MORE_PROMPT));
    let searches = activity.searches();
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].query.query_type(), QueryType::Actor);
    assert_eq!(searches[0].result_count, 0);
}

#[test]
fn failed_lookup_aborts_without_logging_search() {
    let catalog = matrix_catalog();
    catalog.fail.set(true);
    let activity = MemoryActivityStore::new();
    let out = run(&catalog, &activity, "1\n4\nshark\n0\n0\n");

    assert!(out.contains("Description search failed."));
    assert!(activity.searches().is_empty());
}

#[test]
fn genre_search_with_end_before_start_never_queries_films() {
    let catalog = matrix_catalog();
    let activity = MemoryActivityStore::new();
    let out = run(&catalog, &activity, "1\n2\nSci-Fi\n2000\n1999\n0\n0\n");

    assert!(out.contains("End year cannot be before the start year."));
    assert_eq!(catalog.calls(), vec!["genres", "year_range"]);
    assert!(activity.searches().is_empty());

    let errors = activity.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].source, "genre_year_search");
    assert!(errors[0].message.contains("2000"));
    assert!(errors[0].message.contains("1999"));
}

#[test]
fn genre_input_resolves_to_canonical_name() {
    let catalog = matrix_catalog();
    let activity = MemoryActivityStore::new();
    let out = run(&catalog, &activity, "1\n2\n  sci-fi \n1995\n2005\nn\n0\n0\n");

    assert!(out.contains("Available genres:"));
    assert!(out.contains("Release years available: 1990 - 2010"));
    assert_eq!(catalog.calls()[2], "genre:Sci-Fi:1995-2005@0");
    assert_eq!(
        activity.searches()[0].query,
        SearchQuery::GenreYear {
            genre: "Sci-Fi".to_string(),
            year_start: 1995,
            year_end: 2005,
        }
    );
}

#[test]
fn blank_end_year_searches_single_year() {
    let catalog = matrix_catalog();
    let activity = MemoryActivityStore::new();
    let out = run(&catalog, &activity, "1\n2\ncomedy\n2003\n\nn\n0\n0\n");

    assert!(out.contains("or Enter to search only 2003"));
    assert_eq!(catalog.calls()[2], "genre:Comedy:2003-2003@0");
    assert_eq!(activity.searches()[0].result_count, 1);
}

#[test]
fn unknown_genre_is_rejected_and_recorded() {
    let catalog = matrix_catalog();
    let activity = MemoryActivityStore::new();
    let out = run(&catalog, &activity, "1\n2\nWestern\n0\n0\n");

    assert!(out.contains("Unknown genre."));
    assert_eq!(catalog.calls(), vec!["genres", "year_range"]);
    let errors = activity.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("Western"));
}

#[test]
fn empty_genre_list_ends_search_before_prompting() {
    let mut catalog = matrix_catalog();
    catalog.genres = Vec::new();
    let activity = MemoryActivityStore::new();
    let out = run(&catalog, &activity, "1\n2\n0\n0\n");

    assert!(out.contains("No genres found."));
    assert!(!out.contains("Enter a genre: "));
    assert_eq!(catalog.calls(), vec!["genres"]);
    let errors = activity.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].source, "genre_year_search");
    assert_eq!(errors[0].message, "catalog has no genres");
}

#[test]
fn year_validation_messages() {
    let cases = [
        ("abc\n2000\n", "Error: year must be a number.", "abc"),
        ("20000\n\n", "Year must have at most 4 digits.", "20000"),
        ("1980\n2000\n", "Start year must be in the range 1990 - 2010.", "1980"),
        ("2000\n2020\n", "End year must be in the range 1990 - 2010.", "2020"),
    ];
    for (years, message, offending) in cases {
        let catalog = matrix_catalog();
        let activity = MemoryActivityStore::new();
        let script = format!("1\n2\nComedy\n{}0\n0\n", years);
        let out = run(&catalog, &activity, &script);

        assert!(out.contains(message), "missing {:?} in output", message);
        assert_eq!(catalog.calls().len(), 2);
        let errors = activity.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains(offending));
    }
}

#[test]
fn empty_keyword_is_rejected_and_recorded() {
    let catalog = matrix_catalog();
    let activity = MemoryActivityStore::new();
    let out = run(&catalog, &activity, "1\n1\n   \n0\n0\n");

    assert!(out.contains("Search term cannot be empty."));
    assert!(catalog.calls().is_empty());
    assert_eq!(activity.errors()[0].source, "keyword_search");
}

#[test]
fn invalid_choice_redisplays_menu() {
    let catalog = matrix_catalog();
    let activity = MemoryActivityStore::new();
    let out = run(&catalog, &activity, "7\n0\n");

    assert_eq!(out.matches(INVALID_CHOICE).count(), 1);
    assert_eq!(out.matches("MAIN MENU:").count(), 2);
}

#[test]
fn closed_input_mid_search_ends_without_logging() {
    let catalog = matrix_catalog();
    let activity = MemoryActivityStore::new();
    let out = run(&catalog, &activity, "1\n1\nmatrix\n");

    assert!(out.contains("The Matrix"));
    assert!(activity.searches().is_empty());
    assert!(!out.contains(GOODBYE));
}

#[test]
fn stats_reports_follow_searches() {
    let catalog = matrix_catalog();
    let activity = MemoryActivityStore::new();
    let out = run(
        &catalog,
        &activity,
        "1\n1\nmatrix\nn\n1\nmatrix\nn\n0\n2\n1\n2\n3\n0\n0\n",
    );

    assert!(out.contains("Top 5 popular queries:"));
    assert!(out.contains("| keyword    | keyword=matrix |     2 |"));
    assert!(out.contains("Last 5 unique queries:"));
    assert!(out.contains("No errors in the log."));
}

#[test]
fn failed_stats_read_is_reported_and_recorded() {
    let catalog = matrix_catalog();
    let activity = MemoryActivityStore::new();
    activity.set_fail_reads(true);
    let out = run(&catalog, &activity, "2\n1\n0\n0\n");

    assert!(out.contains(STATS_UNAVAILABLE));
    let errors = activity.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].source, "show_popular_queries");
}

#[test]
fn chart_option_renders_or_reports_failure() {
    let catalog = matrix_catalog();
    let activity = MemoryActivityStore::new();
    let out = run(&catalog, &activity, "1\n5\n0\n0\n");
    assert!(out.contains(CHART_TITLE));
    assert!(out.contains("1999  2003"));

    catalog.fail.set(true);
    let out = run(&catalog, &activity, "1\n5\n0\n0\n");
    assert!(out.contains(CHART_UNAVAILABLE));
}

#[test]
fn menu_choices_parse_trimmed_digits() {
    assert_eq!(MainChoice::parse(" 1 "), Some(MainChoice::FilmSearch));
    assert_eq!(MainChoice::parse("3"), None);
    assert_eq!(FilmChoice::parse("5"), Some(FilmChoice::YearChart));
    assert_eq!(StatsChoice::parse("0"), Some(StatsChoice::Back));
    assert_eq!(StatsChoice::parse("y"), None);
}
