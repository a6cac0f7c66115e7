//! # Rusty Roster
//!
//! Reconstructs the data behind published spreadsheet pages: a two-week staff
//! schedule with its project block, and a staff skill matrix. The pages are
//! HTML exports in which cell backgrounds are set through CSS classes, and
//! much of the business meaning lives in those colors.
//!
//! ## Features
//!
//! - **Style resolution**: CSS class rules are mapped to canonical `#rrggbb` colors
//! - **Grid reconstruction**: HTML tables become text and color grids, with
//!   `colspan` expanded or kept as one position per cell
//! - **Schedule rebuild**: the start date is located, day headers are generated,
//!   and staff rows are read as fourteen (text, color) days
//! - **Project classification**: section header rows drive a category state machine
//! - **Talent extraction**: skill levels per staff member with color-derived roles
//! - **Metrics**: days off per week, free resources and training days
//! - **Configurable template**: every positional constant can be overridden from TOML
//!
//! ## Example
//!
//! ```no_run
//! use rusty_roster::{Config, Dashboard};
//!
//! let config = Config::default();
//! let schedule_html = std::fs::read_to_string("schedule.html").unwrap();
//! let talent_html = std::fs::read_to_string("talent.html").unwrap();
//! let dashboard = Dashboard::extract(&schedule_html, &talent_html, &config);
//! if let Some(metrics) = dashboard.metrics(&config) {
//!     println!("{} staff free this fortnight", metrics.free_staff.len());
//! }
//! ```
pub mod config;
pub mod error;
pub mod extract;
mod helpers;
pub mod spreadsheet;

pub use config::Config;
pub use error::RosterError;
pub use extract::projects::{Category, ProjectBook, ProjectRecord};
pub use extract::schedule::{Schedule, ScheduleError, ScheduleRecord};
pub use extract::talent::{Talent, TalentRecord};
pub use extract::Dashboard;
pub use spreadsheet::{Cell, Color, Grid, HtmlSheet, SpanMode, StyleMap};
