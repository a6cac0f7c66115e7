//! # Sheet Template Configuration
//!
//! Every positional constant the extractors rely on lives here. The published
//! sheets follow a fixed template (header row 14, staff rows from row 4, project
//! columns 2..15, ...); none of these are discovered at runtime, so a template
//! change means editing one table instead of chasing literals.
//!
//! All sections deserialize with defaults, so a TOML file only needs to name
//! the values it overrides:
//!
//! ```toml
//! [schedule]
//! first_staff_row = 5
//!
//! [metrics]
//! day_off_color = "#FF0"
//! ```
use crate::error::{RosterError, ResultMessage};
use crate::extract::projects::Category;
use crate::extract::schedule::is_valid_header_format;
use crate::spreadsheet::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised when a configuration is internally inconsistent.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Schedule day count must be positive")]
    ZeroDayCount,

    #[error("Category trigger #{index} has an empty keyword")]
    EmptyTriggerKeyword { index: usize },

    #[error("Role color #{index} has an empty role name")]
    EmptyRoleName { index: usize },

    #[error("Invalid day header format '{0}'")]
    InvalidHeaderFormat(String),

    #[error("Training keyword must not be empty")]
    EmptyTrainingKeyword,
}

/// Complete extraction configuration for both published sheets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub style: StyleConfig,
    pub schedule: ScheduleLayout,
    pub talent: TalentLayout,
    pub projects: ProjectLayout,
    pub metrics: MetricsConfig,
}

impl Config {
    /// Parses a (possibly partial) TOML document over the built-in defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, RosterError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(RosterError::from)
            .with_prefix(&format!("Read config '{}'", path.display()))?;
        Self::from_toml_str(&text).with_prefix(&format!("Parse config '{}'", path.display()))
    }

    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schedule.day_count == 0 {
            return Err(ConfigError::ZeroDayCount);
        }
        if !is_valid_header_format(&self.schedule.header_format) {
            return Err(ConfigError::InvalidHeaderFormat(self.schedule.header_format.clone()));
        }
        if let Some(index) = self.projects.triggers.iter().position(|trigger| trigger.keyword.trim().is_empty()) {
            return Err(ConfigError::EmptyTriggerKeyword { index });
        }
        if self.metrics.training_keyword.trim().is_empty() {
            return Err(ConfigError::EmptyTrainingKeyword);
        }
        if let Some(index) = self.talent.role_colors.iter().position(|entry| entry.role.trim().is_empty()) {
            return Err(ConfigError::EmptyRoleName { index });
        }
        Ok(())
    }
}

/// Style resolution settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Color for cells without a class or with an unmapped class
    pub default_color: Color,
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig {
            default_color: Color::white(),
        }
    }
}

/// Layout of the schedule sheet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleLayout {
    /// Rows scanned for the anchor date
    pub scan_rows: usize,
    /// Columns scanned for the anchor date
    pub scan_cols: usize,
    /// Number of consecutive days in the rebuilt schedule
    pub day_count: usize,
    /// First row holding staff (rows above are header/meta rows)
    pub first_staff_row: usize,
    /// Column holding the staff name
    pub name_col: usize,
    /// Label of the leading name column
    pub staff_label: String,
    /// chrono format of the generated day headers
    pub header_format: String,
}

impl Default for ScheduleLayout {
    fn default() -> Self {
        ScheduleLayout {
            scan_rows: 15,
            scan_cols: 10,
            day_count: 14,
            first_staff_row: 4,
            name_col: 1,
            staff_label: "Staff".to_owned(),
            header_format: "%a %d/%m".to_owned(),
        }
    }
}

/// One entry of the ordered color to role table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoleColor {
    pub color: Color,
    pub role: String,
}

impl RoleColor {
    fn new(color: &str, role: &str) -> Self {
        RoleColor {
            color: Color::parse(color).unwrap_or_else(Color::white),
            role: role.to_owned(),
        }
    }
}

/// Layout of the talent sheet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TalentLayout {
    /// Row holding the column labels
    pub header_row: usize,
    /// Rows need strictly more raw cells than this to be considered
    pub min_cells: usize,
    /// Column holding the staff name (its color encodes the role)
    pub name_col: usize,
    /// Column holding the hire date
    pub hire_date_col: usize,
    /// First skill column; every column from here on is a skill
    pub first_skill_col: usize,
    /// Role for names whose color is not in the table
    pub default_role: String,
    /// Ordered color to role lookup, first match wins
    pub role_colors: Vec<RoleColor>,
}

impl Default for TalentLayout {
    fn default() -> Self {
        TalentLayout {
            header_row: 14,
            min_cells: 5,
            name_col: 2,
            hire_date_col: 3,
            first_skill_col: 5,
            default_role: "Staff".to_owned(),
            role_colors: vec![
                RoleColor::new("#da9694", "IT"),
                RoleColor::new("#fabf8f", "Head Coordinator"),
                RoleColor::new("#fcd5b4", "Vice H. Coordinator"),
                RoleColor::new("#31869b", "Finishing Coordinator"),
                RoleColor::new("#92cddc", "Coordinator"),
                RoleColor::new("#ccc0da", "New Co"),
                RoleColor::new("#d9d9d9", "Trainee"),
            ],
        }
    }
}

impl TalentLayout {
    /// Resolves a staff-name color to a role, first match wins.
    pub fn role_for(&self, color: &Color) -> &str {
        self.role_colors
            .iter()
            .find(|entry| &entry.color == color)
            .map(|entry| entry.role.as_str())
            .unwrap_or(&self.default_role)
    }
}

/// One entry of the ordered keyword to category table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryTrigger {
    /// Matched case-insensitively against the joined row text
    pub keyword: String,
    pub category: Category,
}

impl CategoryTrigger {
    fn new(keyword: &str, category: Category) -> Self {
        CategoryTrigger {
            keyword: keyword.to_owned(),
            category,
        }
    }
}

/// Fixed column positions of the project block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectColumns {
    /// Column whose color tints the whole row
    pub row_color: usize,
    pub id: usize,
    pub title: usize,
    pub to_bali: usize,
    pub to_swiss: usize,
    pub time: usize,
    pub priority: usize,
    pub coordinator: usize,
    /// Only the color of this column is read
    pub file: usize,
    pub over_time: usize,
    pub over_date: usize,
    pub server: usize,
}

impl Default for ProjectColumns {
    fn default() -> Self {
        ProjectColumns {
            row_color: 0,
            id: 2,
            title: 5,
            to_bali: 7,
            to_swiss: 8,
            time: 9,
            priority: 10,
            coordinator: 11,
            file: 12,
            over_time: 13,
            over_date: 14,
            server: 15,
        }
    }
}

impl ProjectColumns {
    /// Width every project row is padded to.
    pub fn width(&self) -> usize {
        [
            self.row_color,
            self.id,
            self.title,
            self.to_bali,
            self.to_swiss,
            self.time,
            self.priority,
            self.coordinator,
            self.file,
            self.over_time,
            self.over_date,
            self.server,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }
}

/// Layout of the project block below the staff schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLayout {
    /// Ordered section triggers, first match wins
    pub triggers: Vec<CategoryTrigger>,
    pub columns: ProjectColumns,
    /// Id text of the repeated column-header row, compared case-insensitively
    pub header_id: String,
    /// Rows between the last staff row count and the project block
    pub row_margin: usize,
    /// Explicit first row, overriding the margin computation
    pub start_row: Option<usize>,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        ProjectLayout {
            triggers: vec![
                CategoryTrigger::new("SELESAI", Category::ProjectDone),
                CategoryTrigger::new("PROJECT DONE", Category::ProjectDone),
                CategoryTrigger::new("ON PROGRESS", Category::OnProgress),
                CategoryTrigger::new("REGISTER", Category::RegisterPoint),
                CategoryTrigger::new("POINT", Category::RegisterPoint),
                CategoryTrigger::new("DOWNLOAD", Category::Download),
                CategoryTrigger::new("AUFTRAG", Category::Auftrag),
            ],
            columns: ProjectColumns::default(),
            header_id: "nr.".to_owned(),
            row_margin: 5,
            start_row: None,
        }
    }
}

/// Settings of the schedule metrics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Background color marking a day off
    pub day_off_color: Color,
    /// Case-insensitive substring marking a training day
    pub training_keyword: String,
    /// Exact day text marking a free staff member
    pub free_token: String,
    /// Days off available per staff member
    pub leave_quota: u32,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        MetricsConfig {
            day_off_color: Color::parse("#ffff00").unwrap_or_else(Color::white),
            training_keyword: "training".to_owned(),
            free_token: "0".to_owned(),
            leave_quota: 30,
        }
    }
}
