//! Text rendering for search results, activity reports and the genre
//! overview.
//!
//! Everything here is pure: each function takes rows and returns the text
//! to print. Empty input always yields a fixed "no data" line and never an
//! empty table.

use chrono::{DateTime, Local, Utc};
use cinescope_activity::{ErrorRecord, QueryFrequency, RecentQuery};
use cinescope_catalog::{
    ActorFilmRow, DescriptionFilmRow, FilmRow, GenreFilmRow, GenreList, YearRange,
};

pub const NO_DATA: &str = "No data to display.";
pub const NO_QUERY_DATA: &str = "No data.";
pub const NO_ERRORS: &str = "No errors in the log.";
pub const NO_GENRES: &str = "No genres found.";
pub const NO_YEAR_RANGE: &str = "Year range unavailable.";

pub const DESCRIPTION_WIDTH: usize = 100;
pub const MESSAGE_WIDTH: usize = 60;

const GENRES_PER_LINE: usize = 4;
const GENRE_PADDING: usize = 4;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone)]
struct Column {
    header: String,
    align: Align,
    max_width: Option<usize>,
}

/// A bordered text table with a header row.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, header: &str, align: Align) -> Self {
        self.columns.push(Column {
            header: header.to_string(),
            align,
            max_width: None,
        });
        self
    }

    /// Add a column whose cells are truncated to `max_width` characters.
    pub fn capped_column(mut self, header: &str, align: Align, max_width: usize) -> Self {
        self.columns.push(Column {
            header: header.to_string(),
            align,
            max_width: Some(max_width),
        });
        self
    }

    /// Append a row. Missing cells render blank and extra cells are dropped.
    pub fn push_row(&mut self, cells: Vec<String>) {
        let row = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                match col.max_width {
                    Some(max) => truncate_str(cell, max),
                    None => cell.to_string(),
                }
            })
            .collect();
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(col.header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let border = {
            let mut line = String::from("+");
            for w in &widths {
                line.push_str(&"-".repeat(w + 2));
                line.push('+');
            }
            line
        };

        let mut out = String::new();
        out.push_str(&border);
        out.push('\n');

        let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        out.push_str(&self.render_line(&headers, &widths, true));
        out.push_str(&border);
        out.push('\n');

        for row in &self.rows {
            out.push_str(&self.render_line(row, &widths, false));
        }
        out.push_str(&border);
        out
    }

    fn render_line(&self, cells: &[String], widths: &[usize], header: bool) -> String {
        let mut line = String::from("|");
        for ((cell, width), col) in cells.iter().zip(widths).zip(&self.columns) {
            let align = if header { Align::Left } else { col.align };
            let padded = match align {
                Align::Left => format!(" {:<width$} ", cell, width = width),
                Align::Right => format!(" {:>width$} ", cell, width = width),
            };
            line.push_str(&padded);
            line.push('|');
        }
        line.push('\n');
        line
    }
}

/// Truncate `s` to `max` characters, ending in `...` when anything was cut.
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let kept: String = s.chars().take(max - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max).collect()
    }
}

fn opt_cell<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// Render a UTC timestamp in local time.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// Search results
// ---------------------------------------------------------------------------

pub fn film_table(rows: &[FilmRow]) -> String {
    if rows.is_empty() {
        return NO_DATA.to_string();
    }
    let mut table = Table::new()
        .column("Title", Align::Left)
        .column("Year", Align::Right)
        .column("Rating", Align::Left)
        .column("Length (min)", Align::Right);
    for row in rows {
        table.push_row(vec![
            row.title.clone(),
            opt_cell(&row.release_year),
            opt_cell(&row.rating),
            opt_cell(&row.length),
        ]);
    }
    table.render()
}

pub fn genre_film_table(rows: &[GenreFilmRow]) -> String {
    if rows.is_empty() {
        return NO_DATA.to_string();
    }
    let mut table = Table::new()
        .column("Title", Align::Left)
        .column("Year", Align::Right)
        .column("Genre", Align::Left);
    for row in rows {
        table.push_row(vec![
            row.title.clone(),
            opt_cell(&row.release_year),
            row.genre.clone(),
        ]);
    }
    table.render()
}

pub fn actor_film_table(rows: &[ActorFilmRow]) -> String {
    if rows.is_empty() {
        return NO_DATA.to_string();
    }
    let mut table = Table::new()
        .column("Title", Align::Left)
        .column("Year", Align::Right)
        .column("Actor", Align::Left);
    for row in rows {
        table.push_row(vec![
            row.title.clone(),
            opt_cell(&row.release_year),
            row.actor.clone(),
        ]);
    }
    table.render()
}

pub fn description_film_table(rows: &[DescriptionFilmRow]) -> String {
    if rows.is_empty() {
        return NO_DATA.to_string();
    }
    let mut table = Table::new()
        .column("Title", Align::Left)
        .column("Year", Align::Right)
        .capped_column("Description", Align::Left, DESCRIPTION_WIDTH);
    for row in rows {
        table.push_row(vec![
            row.title.clone(),
            opt_cell(&row.release_year),
            opt_cell(&row.description),
        ]);
    }
    table.render()
}

// ---------------------------------------------------------------------------
// Activity reports
// ---------------------------------------------------------------------------

pub fn popular_queries_report(rows: &[QueryFrequency]) -> String {
    if rows.is_empty() {
        return NO_QUERY_DATA.to_string();
    }
    let mut table = Table::new()
        .column("Query type", Align::Left)
        .column("Parameters", Align::Left)
        .column("Count", Align::Right);
    for row in rows {
        table.push_row(vec![
            row.query.query_type().to_string(),
            row.query.parameters_display(),
            row.count.to_string(),
        ]);
    }
    format!("Top 5 popular queries:\n{}", table.render())
}

pub fn recent_queries_report(rows: &[RecentQuery]) -> String {
    if rows.is_empty() {
        return NO_QUERY_DATA.to_string();
    }
    let mut table = Table::new()
        .column("Query type", Align::Left)
        .column("Parameters", Align::Left)
        .column("Time", Align::Left);
    for row in rows {
        table.push_row(vec![
            row.query.query_type().to_string(),
            row.query.parameters_display(),
            format_timestamp(&row.timestamp),
        ]);
    }
    format!("Last 5 unique queries:\n{}", table.render())
}

pub fn errors_report(rows: &[ErrorRecord]) -> String {
    if rows.is_empty() {
        return NO_ERRORS.to_string();
    }
    let mut table = Table::new()
        .column("Time", Align::Left)
        .column("Source", Align::Left)
        .capped_column("Message", Align::Left, MESSAGE_WIDTH);
    for row in rows {
        let time = row
            .timestamp
            .as_ref()
            .map(format_timestamp)
            .unwrap_or_else(|| "N/A".to_string());
        table.push_row(vec![time, row.source.clone(), row.message.clone()]);
    }
    format!("Last 5 errors:\n{}", table.render())
}

// ---------------------------------------------------------------------------
// Genre overview
// ---------------------------------------------------------------------------

/// Sorted genre names four per line, then the release year range.
///
/// Either half degrades to a fixed message when its input is missing.
pub fn genre_overview(genres: Option<&GenreList>, years: Option<YearRange>) -> String {
    let mut out = String::new();

    match genres.filter(|g| !g.is_empty()) {
        None => out.push_str(NO_GENRES),
        Some(genres) => {
            let mut names: Vec<&str> = genres.names().iter().map(String::as_str).collect();
            names.sort_unstable();
            let col_width =
                names.iter().map(|n| n.chars().count()).max().unwrap_or(0) + GENRE_PADDING;

            out.push_str("Available genres:");
            for chunk in names.chunks(GENRES_PER_LINE) {
                out.push('\n');
                let line: Vec<String> = chunk
                    .iter()
                    .map(|name| format!("- {:<width$}", name, width = col_width))
                    .collect();
                out.push_str(line.concat().trim_end());
            }
        }
    }

    out.push_str("\n\n");
    match years {
        Some(range) => out.push_str(&format!("Release years available: {}", range)),
        None => out.push_str(NO_YEAR_RANGE),
    }
    out
}

#[cfg(test)]
#[path = "tests/display_tests.rs"]
mod tests;
