//! Operator input validation for searches.
//!
//! Everything here runs before a query reaches the catalog. A failed check
//! carries the offending value so it can be shown to the operator and
//! recorded in the error log.

use std::fmt;

use thiserror::Error;

use crate::types::{GenreList, YearRange};

/// Maximum number of characters in the decimal rendering of a year.
pub const MAX_YEAR_DIGITS: usize = 4;

/// Which end of a year range a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearBound {
    Start,
    End,
}

impl fmt::Display for YearBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("Start year"),
            Self::End => f.write_str("End year"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("search term is empty")]
    EmptyTerm,

    #[error("unknown genre '{0}'")]
    UnknownGenre(String),

    #[error("{bound} is not a number: '{input}'")]
    NotNumeric { bound: YearBound, input: String },

    #[error("{bound} has more than 4 digits: {value}")]
    TooManyDigits { bound: YearBound, value: String },

    #[error("{bound} {year} is outside {range}")]
    OutOfRange {
        bound: YearBound,
        year: i64,
        range: YearRange,
    },

    #[error("End year {end} is before start year {start}")]
    EndBeforeStart { start: i32, end: i32 },
}

/// Trim a free-text search term, rejecting it if nothing is left.
pub fn search_term(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyTerm)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Resolve a genre name against the catalog's genres, case-insensitively.
pub fn genre(genres: &GenreList, input: &str) -> Result<String, ValidationError> {
    genres
        .resolve(input)
        .map(str::to_string)
        .ok_or_else(|| ValidationError::UnknownGenre(input.trim().to_string()))
}

/// Parse and check a release year range typed by the operator.
///
/// A blank end year means "the same as the start year". Checks run in a
/// fixed order: both values must parse, then each bound (start first) must
/// have at most four digits and lie inside `range`, and finally the end
/// must not precede the start.
pub fn year_bounds(
    start_input: &str,
    end_input: &str,
    range: YearRange,
) -> Result<(i32, i32), ValidationError> {
    let start = parse_year(YearBound::Start, start_input)?;
    let end = if end_input.trim().is_empty() {
        start.clone()
    } else {
        parse_year(YearBound::End, end_input)?
    };

    let start = check_year(YearBound::Start, start, range)?;
    let end = check_year(YearBound::End, end, range)?;

    if end < start {
        return Err(ValidationError::EndBeforeStart { start, end });
    }
    Ok((start, end))
}

/// A parsed year before its digit and range checks.
#[derive(Debug, Clone)]
enum ParsedYear {
    Value(i64),
    /// All digits, but too long to fit any integer type we care about.
    Oversized(String),
}

fn parse_year(bound: YearBound, input: &str) -> Result<ParsedYear, ValidationError> {
    let trimmed = input.trim();
    match trimmed.parse::<i64>() {
        Ok(v) => Ok(ParsedYear::Value(v)),
        Err(_) => {
            let digits = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                Ok(ParsedYear::Oversized(trimmed.to_string()))
            } else {
                Err(ValidationError::NotNumeric {
                    bound,
                    input: trimmed.to_string(),
                })
            }
        }
    }
}

fn check_year(
    bound: YearBound,
    year: ParsedYear,
    range: YearRange,
) -> Result<i32, ValidationError> {
    let value = match year {
        ParsedYear::Oversized(value) => {
            return Err(ValidationError::TooManyDigits { bound, value });
        }
        ParsedYear::Value(v) => v,
    };
    if value.to_string().len() > MAX_YEAR_DIGITS {
        return Err(ValidationError::TooManyDigits {
            bound,
            value: value.to_string(),
        });
    }
    if !range.contains(value) {
        return Err(ValidationError::OutOfRange {
            bound,
            year: value,
            range,
        });
    }
    // Four characters at most, so this always fits.
    Ok(value as i32)
}

#[cfg(test)]
#[path = "tests/validate_tests.rs"]
mod tests;
