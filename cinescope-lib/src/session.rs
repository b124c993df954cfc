//! The interactive menu loop.
//!
//! A session moves between three menus. Each menu choice runs to completion
//! (a search, a report, the chart) and returns to the menu it came from.
//! Closing the input ends the session from anywhere.

use std::io::{self, BufRead, Write};

use cinescope_activity::ActivityStore;

use crate::access::FilmCatalog;
use crate::console::{Console, is_end_of_input};

pub const INVALID_CHOICE: &str = "Invalid choice. Try again.";
pub const GOODBYE: &str = "Goodbye!";
const CHOICE_PROMPT: &str = "Choose an action: ";

/// Which menu the session is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Main,
    FilmSearch,
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Exit,
    FilmSearch,
    Stats,
}

impl MainChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "0" => Some(Self::Exit),
            "1" => Some(Self::FilmSearch),
            "2" => Some(Self::Stats),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilmChoice {
    Back,
    Keyword,
    GenreYear,
    Actor,
    Description,
    YearChart,
}

impl FilmChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "0" => Some(Self::Back),
            "1" => Some(Self::Keyword),
            "2" => Some(Self::GenreYear),
            "3" => Some(Self::Actor),
            "4" => Some(Self::Description),
            "5" => Some(Self::YearChart),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsChoice {
    Back,
    Popular,
    Recent,
    Errors,
}

impl StatsChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "0" => Some(Self::Back),
            "1" => Some(Self::Popular),
            "2" => Some(Self::Recent),
            "3" => Some(Self::Errors),
            _ => None,
        }
    }
}

const MAIN_MENU: &[&str] = &["\"0\". Exit", "\"1\". Film search", "\"2\". Query statistics"];

const FILM_MENU: &[&str] = &[
    "\"0\". Back to main menu",
    "\"1\". Search films by keyword",
    "\"2\". Search films by genre and release years",
    "\"3\". Search films by actor name",
    "\"4\". Search films by description",
    "\"5\". Films per release year (chart)",
];

const STATS_MENU: &[&str] = &[
    "\"0\". Back to main menu",
    "\"1\". Top 5 popular queries",
    "\"2\". Last 5 unique queries",
    "\"3\". Last 5 errors",
];

/// One operator session against a catalog and an activity store.
pub struct Session<'a, R, W> {
    pub(crate) catalog: &'a dyn FilmCatalog,
    pub(crate) activity: &'a dyn ActivityStore,
    pub(crate) console: Console<R, W>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        catalog: &'a dyn FilmCatalog,
        activity: &'a dyn ActivityStore,
        input: R,
        output: W,
    ) -> Self {
        Self {
            catalog,
            activity,
            console: Console::new(input, output),
        }
    }

    /// Run menus until the operator exits or closes the input.
    ///
    /// Only I/O failures other than end of input are returned.
    pub fn run(&mut self) -> io::Result<()> {
        match self.run_menus() {
            Err(e) if is_end_of_input(&e) => {
                log::debug!("Input closed, ending session");
                Ok(())
            }
            other => other,
        }
    }

    pub fn into_output(self) -> W {
        self.console.into_output()
    }

    fn run_menus(&mut self) -> io::Result<()> {
        let mut menu = Menu::Main;
        loop {
            menu = match menu {
                Menu::Main => match self.choose("MAIN MENU:", MAIN_MENU, MainChoice::parse)? {
                    MainChoice::Exit => {
                        self.console.say(GOODBYE)?;
                        return Ok(());
                    }
                    MainChoice::FilmSearch => Menu::FilmSearch,
                    MainChoice::Stats => Menu::Stats,
                },
                Menu::FilmSearch => {
                    match self.choose("FILM SEARCH:", FILM_MENU, FilmChoice::parse)? {
                        FilmChoice::Back => Menu::Main,
                        FilmChoice::Keyword => {
                            self.keyword_search()?;
                            Menu::FilmSearch
                        }
                        FilmChoice::GenreYear => {
                            self.genre_year_search()?;
                            Menu::FilmSearch
                        }
                        FilmChoice::Actor => {
                            self.actor_search()?;
                            Menu::FilmSearch
                        }
                        FilmChoice::Description => {
                            self.description_search()?;
                            Menu::FilmSearch
                        }
                        FilmChoice::YearChart => {
                            self.show_year_chart()?;
                            Menu::FilmSearch
                        }
                    }
                }
                Menu::Stats => {
                    match self.choose("QUERY STATISTICS:", STATS_MENU, StatsChoice::parse)? {
                        StatsChoice::Back => Menu::Main,
                        StatsChoice::Popular => {
                            self.show_popular_queries()?;
                            Menu::Stats
                        }
                        StatsChoice::Recent => {
                            self.show_latest_queries()?;
                            Menu::Stats
                        }
                        StatsChoice::Errors => {
                            self.show_last_errors()?;
                            Menu::Stats
                        }
                    }
                }
            };
        }
    }

    /// Show a menu until the operator picks a valid entry.
    fn choose<T>(
        &mut self,
        title: &str,
        entries: &[&str],
        parse: fn(&str) -> Option<T>,
    ) -> io::Result<T> {
        loop {
            self.console.heading(title)?;
            for entry in entries {
                self.console.say(entry)?;
            }
            let input = self.console.prompt(CHOICE_PROMPT)?;
            match parse(&input) {
                Some(choice) => return Ok(choice),
                None => self.console.warn(INVALID_CHOICE)?,
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
