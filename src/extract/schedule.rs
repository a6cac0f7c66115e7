//! Rebuilds the two-week staff schedule from the schedule sheet grid.
//!
//! The sheet carries a single start date somewhere in its top-left corner; the
//! day columns start at that date's column and run for `day_count` days,
//! weekends included. Staff rows start at a fixed offset below the header rows.
use crate::config::ScheduleLayout;
use crate::spreadsheet::{Cell, Color, Grid};
use chrono::format::{Item, StrftimeItems};
use chrono::{Duration, NaiveDate};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, info, warn};

/// `d/m/y` or `d-m-y` tokens; the year has two to four digits
static DATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})[/-](\d{1,2})[/-](\d{2,4})").expect("Hardcode regex pattern"));

/// Fallback header format when the configured one is not a valid strftime string
const DEFAULT_HEADER_FORMAT: &str = "%a %d/%m";

/// Reasons a schedule cannot be rebuilt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// No date-like token inside the scan window
    #[error("Could not find start date in the first {rows} rows and {cols} columns")]
    NoStartDate { rows: usize, cols: usize },
}

/// Location and value of the date the schedule starts on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Anchor {
    pub row: usize,
    pub col: usize,
    pub date: NaiveDate,
}

/// One staff member's row: name, name color and exactly `day_count` day cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScheduleRecord {
    pub staff_name: String,
    pub name_color: Color,
    pub days: Vec<Cell>,
}

/// The rebuilt schedule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub anchor: Anchor,
    /// Staff label followed by one label per day
    pub headers: Vec<String>,
    /// Staff rows in document order
    pub records: Vec<ScheduleRecord>,
}

impl Schedule {
    /// Labels of the day columns, without the leading staff label.
    pub fn day_headers(&self) -> &[String] {
        self.headers.get(1..).unwrap_or(&[])
    }

    /// Calendar date of every day column.
    pub fn dates(&self) -> Vec<NaiveDate> {
        (0..self.day_headers().len())
            .map(|offset| self.anchor.date + Duration::days(offset as i64))
            .collect()
    }

    pub fn find(&self, staff_name: &str) -> Option<&ScheduleRecord> {
        self.records.iter().find(|record| record.staff_name == staff_name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Checks that a chrono format string contains no invalid specifiers.
pub(crate) fn is_valid_header_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Parses a `D/M/Y` token (separators `/` or `-`) day-first.
///
/// Two-digit years are read as `20yy`. A token that is not a valid date
/// day-first is retried month-first, as lenient day-first parsers do.
pub fn parse_day_first(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let first: u32 = day.parse().ok()?;
    let second: u32 = month.parse().ok()?;
    let mut year: i32 = year.parse().ok()?;
    if year < 100 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, second, first).or_else(|| NaiveDate::from_ymd_opt(year, first, second))
}

/// Scans the top-left window of the grid for the first date-like token.
pub fn find_anchor(grid: &Grid, layout: &ScheduleLayout) -> Option<Anchor> {
    let rows = layout.scan_rows.min(grid.len());
    let cols = layout.scan_cols.min(grid.width());
    for row in 0..rows {
        for col in 0..cols {
            let text = grid.text(row, col);
            for captures in DATE_TOKEN.captures_iter(text) {
                match parse_day_first(&captures[1], &captures[2], &captures[3]) {
                    Some(date) => return Some(Anchor { row, col, date }),
                    None => debug!(reference = grid.reference(row, col), token = &captures[0], "skip invalid date token"),
                }
            }
        }
    }
    None
}

/// Generates the staff label plus one `header_format` label per day from `start`.
pub fn day_headers(start: NaiveDate, layout: &ScheduleLayout) -> Vec<String> {
    let format = if is_valid_header_format(&layout.header_format) {
        layout.header_format.as_str()
    } else {
        warn!(format = layout.header_format, "invalid header format, using default");
        DEFAULT_HEADER_FORMAT
    };
    let mut headers = Vec::with_capacity(layout.day_count + 1);
    headers.push(layout.staff_label.clone());
    for offset in 0..layout.day_count {
        let day = start + Duration::days(offset as i64);
        headers.push(day.format(format).to_string());
    }
    headers
}

/// Rebuilds the schedule from an expanded grid.
///
/// Fails only when no start date is found; every other irregularity (short
/// rows, missing cells) is padded with empty text and the grid's default color.
pub fn rebuild_schedule(grid: &Grid, layout: &ScheduleLayout) -> Result<Schedule, ScheduleError> {
    let anchor = find_anchor(grid, layout).ok_or_else(|| {
        warn!(rows = layout.scan_rows, cols = layout.scan_cols, "no start date in scan window");
        ScheduleError::NoStartDate {
            rows: layout.scan_rows,
            cols: layout.scan_cols,
        }
    })?;
    info!(
        reference = grid.reference(anchor.row, anchor.col),
        date = %anchor.date,
        "schedule anchor found"
    );

    let headers = day_headers(anchor.date, layout);
    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in layout.first_staff_row..grid.len() {
        let name = grid.text(row, layout.name_col).trim();
        if name.is_empty() || name.eq_ignore_ascii_case("none") {
            skipped += 1;
            continue;
        }
        records.push(ScheduleRecord {
            staff_name: name.to_owned(),
            name_color: grid.color(row, layout.name_col).clone(),
            days: grid.slice(row, anchor.col, layout.day_count),
        });
    }
    debug!(records = records.len(), skipped, "schedule rows extracted");

    Ok(Schedule {
        anchor,
        headers,
        records,
    })
}
