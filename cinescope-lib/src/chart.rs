//! Terminal line chart of film counts per release year.

use cinescope_catalog::YearCount;

use crate::display::NO_DATA;

pub const CHART_TITLE: &str = "Films per release year";

/// Plot rows above the zero line.
const HEIGHT: usize = 10;
/// Columns between neighbouring years.
const STEP: usize = 6;

const MARKER: char = '*';
const TRACE: char = '.';

/// Render `counts` as a line chart: one marker per year, dotted segments
/// between neighbouring years, a count axis on the left and year labels
/// underneath. Years are evenly spaced in the order given. A group without
/// a release year is skipped.
pub fn year_chart(counts: &[YearCount]) -> String {
    let points: Vec<(i32, i64)> = counts
        .iter()
        .filter_map(|c| c.release_year.map(|year| (year, c.film_count.max(0))))
        .collect();
    if points.is_empty() {
        return NO_DATA.to_string();
    }

    let max = points.iter().map(|(_, n)| *n).max().unwrap_or(0).max(1);
    let levels: Vec<usize> = points.iter().map(|(_, n)| level(*n, max)).collect();
    let width = (points.len() - 1) * STEP + 1;

    // grid[0] is the top row, grid[HEIGHT] the zero line.
    let mut grid = vec![vec![' '; width]; HEIGHT + 1];

    for (i, pair) in levels.windows(2).enumerate() {
        let (from, to) = (pair[0] as f64, pair[1] as f64);
        let x0 = i * STEP;
        for dx in 1..STEP {
            let lvl = (from + (to - from) * dx as f64 / STEP as f64).round() as usize;
            grid[HEIGHT - lvl.min(HEIGHT)][x0 + dx] = TRACE;
        }
    }
    for (i, lvl) in levels.iter().enumerate() {
        grid[HEIGHT - lvl][i * STEP] = MARKER;
    }

    let label_width = max.to_string().len();
    let mut out = String::from(CHART_TITLE);
    out.push_str("\n\n");

    for (row, cells) in grid.iter().enumerate() {
        let label = match row {
            0 => max.to_string(),
            r if r == HEIGHT / 2 => ((max + 1) / 2).to_string(),
            r if r == HEIGHT => "0".to_string(),
            _ => String::new(),
        };
        let line: String = cells.iter().collect();
        let rendered = format!("{:>w$} | {}", label, line, w = label_width);
        out.push_str(rendered.trim_end());
        out.push('\n');
    }

    out.push_str(&format!("{:>w$} +-{}\n", "", "-".repeat(width), w = label_width));
    out.push_str(&format!("{:>w$}   {}", "", year_labels(&points), w = label_width));
    out.trim_end().to_string()
}

/// Scale `count` to a row index in `0..=HEIGHT`.
fn level(count: i64, max: i64) -> usize {
    let scaled = (count * HEIGHT as i64 + max / 2) / max;
    scaled.clamp(0, HEIGHT as i64) as usize
}

/// Year labels starting under each marker, skipping any that would collide
/// with the previous label.
fn year_labels(points: &[(i32, i64)]) -> String {
    let mut line = String::new();
    for (i, (year, _)) in points.iter().enumerate() {
        let col = i * STEP;
        let used = line.chars().count();
        if i > 0 && used >= col {
            continue;
        }
        line.push_str(&" ".repeat(col - used));
        line.push_str(&year.to_string());
    }
    line
}

#[cfg(test)]
#[path = "tests/chart_tests.rs"]
mod tests;
