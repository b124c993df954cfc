use super::*;

fn range() -> YearRange {
    YearRange::new(1990, 2010)
}

#[test]
fn blank_end_year_defaults_to_start() {
    assert_eq!(year_bounds("2005", "", range()), Ok((2005, 2005)));
    assert_eq!(year_bounds(" 2005 ", "   ", range()), Ok((2005, 2005)));
}

#[test]
fn accepts_inclusive_bounds() {
    assert_eq!(year_bounds("1990", "2010", range()), Ok((1990, 2010)));
}

#[test]
fn end_before_start_is_rejected() {
    let err = year_bounds("2000", "1999", range()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::EndBeforeStart {
            start: 2000,
            end: 1999
        }
    );
}

#[test]
fn non_numeric_start() {
    let err = year_bounds("two thousand", "2001", range()).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::NotNumeric {
            bound: YearBound::Start,
            ..
        }
    ));
}

#[test]
fn non_numeric_end_reported_before_range_checks() {
    // Start is out of range, but the parse failure of the end wins.
    let err = year_bounds("1800", "abc", range()).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::NotNumeric {
            bound: YearBound::End,
            ..
        }
    ));
}

#[test]
fn five_digit_year_is_rejected_before_range() {
    let err = year_bounds("20050", "", range()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::TooManyDigits {
            bound: YearBound::Start,
            value: "20050".to_string()
        }
    );
}

#[test]
fn huge_digit_string_counts_as_too_many_digits() {
    let err = year_bounds("2000", "99999999999999999999999", range()).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::TooManyDigits {
            bound: YearBound::End,
            ..
        }
    ));
}

#[test]
fn leading_zeros_do_not_count_as_digits() {
    // "02005" parses to 2005, which has four digits.
    assert_eq!(year_bounds("02005", "", range()), Ok((2005, 2005)));
}

#[test]
fn out_of_range_start() {
    let err = year_bounds("1985", "2000", range()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::OutOfRange {
            bound: YearBound::Start,
            year: 1985,
            range: range()
        }
    );
}

#[test]
fn out_of_range_end() {
    let err = year_bounds("2000", "2011", range()).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::OutOfRange {
            bound: YearBound::End,
            year: 2011,
            ..
        }
    ));
}

#[test]
fn genre_resolves_to_canonical_case() {
    let genres = GenreList::new(vec!["Action".into(), "Sci-Fi".into()]);
    assert_eq!(genre(&genres, "sci-fi"), Ok("Sci-Fi".to_string()));
    assert_eq!(genre(&genres, "  ACTION "), Ok("Action".to_string()));
}

#[test]
fn unknown_genre_keeps_input() {
    let genres = GenreList::new(vec!["Action".into()]);
    assert_eq!(
        genre(&genres, " Western "),
        Err(ValidationError::UnknownGenre("Western".to_string()))
    );
}

#[test]
fn search_term_trims_and_rejects_blank() {
    assert_eq!(search_term("  matrix "), Ok("matrix".to_string()));
    assert_eq!(search_term("   "), Err(ValidationError::EmptyTerm));
}
