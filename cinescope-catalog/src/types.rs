//! Data model types for the film catalog.
//!
//! Rows are transient: each one is produced by a single catalog query and
//! handed straight to the presentation layer. Search queries describe what
//! the operator asked for and are the unit recorded in the activity log.

use std::fmt;
use std::str::FromStr;

// ── Film rows ───────────────────────────────────────────────────────────────

/// A film matched by a title keyword search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmRow {
    pub film_id: i64,
    pub title: String,
    pub release_year: Option<i32>,
    pub rating: Option<String>,
    /// Running time in minutes.
    pub length: Option<i32>,
}

/// A film matched by a genre + release year search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreFilmRow {
    pub film_id: i64,
    pub title: String,
    pub release_year: Option<i32>,
    pub genre: String,
}

/// A film matched by an actor name search, with the actor's full name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorFilmRow {
    pub title: String,
    pub release_year: Option<i32>,
    pub actor: String,
}

/// A film matched by a description keyword search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionFilmRow {
    pub title: String,
    pub release_year: Option<i32>,
    pub description: Option<String>,
}

/// Number of films released in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCount {
    /// `None` groups films without a recorded release year.
    pub release_year: Option<i32>,
    pub film_count: i64,
}

// ── Year range ──────────────────────────────────────────────────────────────

/// Earliest and latest release year present in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, year: i64) -> bool {
        year >= i64::from(self.min) && year <= i64::from(self.max)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}

// ── Genres ──────────────────────────────────────────────────────────────────

/// The catalog's genre names, resolvable case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreList {
    names: Vec<String>,
}

impl GenreList {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolve operator input to the genre's canonical stored form.
    ///
    /// Surrounding whitespace and letter case are ignored, so `" sci-fi"`
    /// resolves to `"Sci-Fi"`.
    pub fn resolve(&self, input: &str) -> Option<&str> {
        let wanted = input.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        self.names
            .iter()
            .find(|name| name.to_lowercase() == wanted)
            .map(String::as_str)
    }
}

// ── Search queries ──────────────────────────────────────────────────────────

/// The four kinds of search the operator can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    Keyword,
    GenreYear,
    Actor,
    Description,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::GenreYear => "genre_year",
            Self::Actor => "actor",
            Self::Description => "description",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryType {
    type Err = UnknownQueryType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keyword" => Ok(Self::Keyword),
            "genre_year" => Ok(Self::GenreYear),
            "actor" => Ok(Self::Actor),
            "description" => Ok(Self::Description),
            other => Err(UnknownQueryType(other.to_string())),
        }
    }
}

/// A query type name that is not one of the known kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown query type '{0}'")]
pub struct UnknownQueryType(pub String);

/// A single named search parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamValue {
    Text(String),
    Year(i32),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Year(y) => write!(f, "{}", y),
        }
    }
}

/// A completed search request: its kind plus its validated parameters.
///
/// Two searches with the same kind and parameters are the same query for
/// the purpose of activity statistics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SearchQuery {
    Keyword { keyword: String },
    GenreYear {
        genre: String,
        year_start: i32,
        year_end: i32,
    },
    Actor { actor_name: String },
    Description { keyword: String },
}

impl SearchQuery {
    pub fn query_type(&self) -> QueryType {
        match self {
            Self::Keyword { .. } => QueryType::Keyword,
            Self::GenreYear { .. } => QueryType::GenreYear,
            Self::Actor { .. } => QueryType::Actor,
            Self::Description { .. } => QueryType::Description,
        }
    }

    /// Named parameters in their fixed display/storage order.
    pub fn parameters(&self) -> Vec<(&'static str, ParamValue)> {
        match self {
            Self::Keyword { keyword } | Self::Description { keyword } => {
                vec![("keyword", ParamValue::Text(keyword.clone()))]
            }
            Self::GenreYear {
                genre,
                year_start,
                year_end,
            } => vec![
                ("genre", ParamValue::Text(genre.clone())),
                ("year_start", ParamValue::Year(*year_start)),
                ("year_end", ParamValue::Year(*year_end)),
            ],
            Self::Actor { actor_name } => {
                vec![("actor_name", ParamValue::Text(actor_name.clone()))]
            }
        }
    }

    /// Rebuild a query from its kind and a parameter lookup.
    ///
    /// Returns `None` when a parameter the kind requires is missing or has
    /// the wrong shape.
    pub fn from_parts(
        query_type: QueryType,
        mut param: impl FnMut(&str) -> Option<ParamValue>,
    ) -> Option<Self> {
        let mut text = |name: &str| match param(name)? {
            ParamValue::Text(s) => Some(s),
            ParamValue::Year(_) => None,
        };
        match query_type {
            QueryType::Keyword => Some(Self::Keyword {
                keyword: text("keyword")?,
            }),
            QueryType::Description => Some(Self::Description {
                keyword: text("keyword")?,
            }),
            QueryType::Actor => Some(Self::Actor {
                actor_name: text("actor_name")?,
            }),
            QueryType::GenreYear => {
                let genre = text("genre")?;
                let year = |v: Option<ParamValue>| match v? {
                    ParamValue::Year(y) => Some(y),
                    ParamValue::Text(_) => None,
                };
                let year_start = year(param("year_start"))?;
                let year_end = year(param("year_end"))?;
                Some(Self::GenreYear {
                    genre,
                    year_start,
                    year_end,
                })
            }
        }
    }

    /// `key=value` pairs joined by `, `, e.g. `genre=Comedy, year_start=2005, year_end=2006`.
    pub fn parameters_display(&self) -> String {
        self.parameters()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
