//! # Extraction Module
//!
//! This module turns reconstructed grids into the domain records of the two
//! published sheets: the staff schedule and project block of the schedule
//! sheet, and the skill matrix of the talent sheet.
//!
//! [`Dashboard`] runs every extractor over both documents and returns the
//! results as one explicit context value. Metrics and skill scores are derived
//! on demand from that context.
use crate::config::Config;
use crate::spreadsheet::{Grid, HtmlSheet, SpanMode, StyleMap};
use serde::Serialize;
use tracing::{info, warn};

pub mod metrics;
pub mod projects;
pub mod schedule;
pub mod skills;
pub mod talent;

use metrics::Metrics;
use projects::{classify_projects, ProjectBook, ProjectRecord};
use schedule::{rebuild_schedule, Schedule, ScheduleError};
use talent::{extract_talent, Talent};

/// Reconstructs the schedule sheet grid with spans expanded.
pub fn schedule_grid(html: &str, config: &Config) -> (StyleMap, Grid) {
    let sheet = HtmlSheet::parse(html, &config.style.default_color);
    let grid = sheet.grid(SpanMode::Expand);
    (sheet.styles().clone(), grid)
}

/// Extracts the skill matrix from a talent sheet document.
pub fn talent_from_html(html: &str, config: &Config) -> Talent {
    let grid = HtmlSheet::parse(html, &config.style.default_color).grid(SpanMode::Collapse);
    extract_talent(&grid, &config.talent)
}

/// First row of the project block.
///
/// An explicit `start_row` wins; otherwise the block is assumed to start
/// `row_margin` rows past the staff count, or at `row_margin` when the
/// schedule could not be rebuilt.
pub fn project_start_row(schedule: &Result<Schedule, ScheduleError>, config: &Config) -> usize {
    if let Some(row) = config.projects.start_row {
        return row;
    }
    let staff = schedule.as_ref().map_or(0, Schedule::len);
    staff + config.projects.row_margin
}

/// Everything extracted from one pair of sheet documents.
#[derive(Clone, Debug)]
pub struct Dashboard {
    /// Class colors of the schedule sheet
    pub styles: StyleMap,
    /// Expanded grid of the schedule sheet, for positional access
    pub grid: Grid,
    pub schedule: Result<Schedule, ScheduleError>,
    pub project_start_row: usize,
    pub projects: ProjectBook,
    pub talent: Talent,
}

impl Dashboard {
    /// Runs every extractor over both documents.
    ///
    /// # Arguments
    ///
    /// * `schedule_html` - Published page of the schedule sheet
    /// * `talent_html` - Published page of the talent sheet
    /// * `config` - Template layout and metric settings
    ///
    /// # Returns
    ///
    /// The extraction context. A schedule without a start date is kept as an
    /// error value; projects and talent are still extracted.
    pub fn extract(schedule_html: &str, talent_html: &str, config: &Config) -> Self {
        let (styles, grid) = schedule_grid(schedule_html, config);
        let schedule = rebuild_schedule(&grid, &config.schedule);
        if let Err(error) = &schedule {
            warn!("schedule unavailable: {}", error);
        }
        let project_start_row = project_start_row(&schedule, config);
        let projects = classify_projects(&grid, project_start_row, &config.projects);
        let talent = talent_from_html(talent_html, config);
        info!(
            staff = schedule.as_ref().map_or(0, Schedule::len),
            projects = projects.len(),
            talent = talent.len(),
            "dashboard extracted"
        );
        Dashboard {
            styles,
            grid,
            schedule,
            project_start_row,
            projects,
            talent,
        }
    }

    /// Schedule metrics, when the schedule was rebuilt.
    pub fn metrics(&self, config: &Config) -> Option<Metrics> {
        self.schedule
            .as_ref()
            .ok()
            .map(|schedule| Metrics::derive(schedule, &config.metrics))
    }

    /// A serializable snapshot of the context.
    pub fn report(&self, config: &Config) -> DashboardReport<'_> {
        DashboardReport {
            schedule: self.schedule.as_ref().ok(),
            schedule_error: self.schedule.as_ref().err().map(ToString::to_string),
            metrics: self.metrics(config),
            projects: self.projects.all().collect(),
            talent: &self.talent,
        }
    }
}

/// JSON shape of a [`Dashboard`].
#[derive(Debug, Serialize)]
pub struct DashboardReport<'a> {
    pub schedule: Option<&'a Schedule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_error: Option<String>,
    pub metrics: Option<Metrics>,
    pub projects: Vec<&'a ProjectRecord>,
    pub talent: &'a Talent,
}
