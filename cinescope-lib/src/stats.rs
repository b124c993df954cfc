//! Statistics reports and the per-year chart.

use std::io::{self, BufRead, Write};

use cinescope_activity::{ActivityError, DEFAULT_REPORT_LIMIT};

use crate::access::Lookup;
use crate::chart;
use crate::display;
use crate::session::Session;

pub const STATS_UNAVAILABLE: &str = "Could not read activity statistics.";
pub const CHART_UNAVAILABLE: &str = "Could not load chart data.";

pub mod source {
    pub const POPULAR: &str = "show_popular_queries";
    pub const LATEST: &str = "show_latest_queries";
    pub const ERRORS: &str = "show_last_errors";
    pub const YEAR_CHART: &str = "show_film_stats_by_year";
}

impl<R: BufRead, W: Write> Session<'_, R, W> {
    pub(crate) fn show_popular_queries(&mut self) -> io::Result<()> {
        let result = self.activity.most_frequent_queries(DEFAULT_REPORT_LIMIT);
        self.report(source::POPULAR, result, display::popular_queries_report)
    }

    pub(crate) fn show_latest_queries(&mut self) -> io::Result<()> {
        let result = self.activity.recent_unique_queries(DEFAULT_REPORT_LIMIT);
        self.report(source::LATEST, result, display::recent_queries_report)
    }

    pub(crate) fn show_last_errors(&mut self) -> io::Result<()> {
        let result = self.activity.recent_errors(DEFAULT_REPORT_LIMIT);
        self.report(source::ERRORS, result, display::errors_report)
    }

    pub(crate) fn show_year_chart(&mut self) -> io::Result<()> {
        match self.catalog.film_counts_by_year() {
            Lookup::Found(counts) => {
                self.console.blank()?;
                self.console.say(&chart::year_chart(&counts))
            }
            Lookup::Failed => {
                log::warn!("{} aborted: film counts unavailable", source::YEAR_CHART);
                self.console.warn(CHART_UNAVAILABLE)
            }
        }
    }

    fn report<T>(
        &mut self,
        source: &str,
        result: Result<Vec<T>, ActivityError>,
        render: fn(&[T]) -> String,
    ) -> io::Result<()> {
        match result {
            Ok(rows) => {
                self.console.blank()?;
                self.console.say(&render(&rows))
            }
            Err(e) => {
                log::warn!("{} failed: {}", source, e);
                self.activity.record_error(source, &e.to_string());
                self.console.warn(STATS_UNAVAILABLE)
            }
        }
    }
}
