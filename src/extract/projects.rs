//! Classifies the project block of the schedule sheet into status categories.
//!
//! The block is a sequence of sections, each introduced by a header row whose
//! text names the category ("ON PROGRESS", "PROJECT SELESAI", ...). The current
//! category carries over every row until the next header row, so a single
//! forward pass with one piece of state is enough.
use crate::config::ProjectLayout;
use crate::config::CategoryTrigger;
use crate::spreadsheet::{Color, Grid};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Status category of a project section.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    ProjectDone,
    OnProgress,
    RegisterPoint,
    Download,
    Auftrag,
}

impl Category {
    /// All categories in report order.
    pub const ALL: [Category; 5] = [
        Category::ProjectDone,
        Category::OnProgress,
        Category::RegisterPoint,
        Category::Download,
        Category::Auftrag,
    ];

    /// Display label, as the sheet names the section.
    pub fn label(&self) -> &'static str {
        match self {
            Category::ProjectDone => "PROJECT SELESAI",
            Category::OnProgress => "ON PROGRESS",
            Category::RegisterPoint => "REGISTER & POINT",
            Category::Download => "DOWNLOAD",
            Category::Auftrag => "AUFTRAG",
        }
    }

    fn index(&self) -> usize {
        match self {
            Category::ProjectDone => 0,
            Category::OnProgress => 1,
            Category::RegisterPoint => 2,
            Category::Download => 3,
            Category::Auftrag => 4,
        }
    }
}

/// One project row, read from fixed column positions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProjectRecord {
    pub category: Category,
    pub id: String,
    pub id_color: Color,
    /// Color of the row's first cell, used to tint the whole row
    pub row_color: Color,
    pub title: String,
    pub to_bali: String,
    pub to_swiss: String,
    pub time: String,
    pub priority: String,
    pub coordinator: String,
    /// File status is carried by color only
    pub file_color: Color,
    pub over_time: String,
    pub over_date: String,
    pub server: String,
}

/// The records of one category, in document order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProjectSection {
    pub category: Category,
    pub label: &'static str,
    pub records: Vec<ProjectRecord>,
}

/// Project records grouped by category; every category is present, possibly empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProjectBook {
    sections: Vec<ProjectSection>,
}

impl Default for ProjectBook {
    fn default() -> Self {
        ProjectBook {
            sections: Category::ALL
                .iter()
                .map(|category| ProjectSection {
                    category: *category,
                    label: category.label(),
                    records: Vec::new(),
                })
                .collect(),
        }
    }
}

impl ProjectBook {
    pub fn sections(&self) -> &[ProjectSection] {
        &self.sections
    }

    pub fn category(&self, category: Category) -> &[ProjectRecord] {
        &self.sections[category.index()].records
    }

    /// Every record, categories in report order and document order within each.
    pub fn all(&self) -> impl Iterator<Item = &ProjectRecord> {
        self.sections.iter().flat_map(|section| section.records.iter())
    }

    /// Records whose coordinator field contains `name`, ignoring case.
    pub fn for_coordinator(&self, name: &str) -> Vec<&ProjectRecord> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return Vec::new();
        }
        self.all()
            .filter(|record| record.coordinator.to_lowercase().contains(&name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(|section| section.records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, record: ProjectRecord) {
        self.sections[record.category.index()].records.push(record);
    }
}

/// Finds the category a row's uppercased text announces, first trigger wins.
pub fn match_trigger(row_text: &str, triggers: &[CategoryTrigger]) -> Option<Category> {
    triggers
        .iter()
        .find(|trigger| row_text.contains(&trigger.keyword.to_uppercase()))
        .map(|trigger| trigger.category)
}

/// Runs the section state machine over the grid from `start_row` to the end.
///
/// Header rows switch the current category and are never emitted. A data
/// row is emitted only once a category is active and only when its id cell
/// is neither empty nor the repeated column-header label.
pub fn classify_projects(grid: &Grid, start_row: usize, layout: &ProjectLayout) -> ProjectBook {
    let columns = &layout.columns;
    let width = columns.width();
    let header_id = layout.header_id.to_lowercase();
    let mut book = ProjectBook::default();
    let mut state: Option<Category> = None;

    for row in start_row..grid.len() {
        let row_text = grid
            .row(row)
            .unwrap_or_default()
            .iter()
            .filter(|cell| !cell.is_empty())
            .map(|cell| cell.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();

        if let Some(category) = match_trigger(&row_text, &layout.triggers) {
            debug!(reference = grid.reference(row, 0), category = category.label(), "enter project section");
            state = Some(category);
            continue;
        }

        let Some(category) = state else {
            continue;
        };
        let cells = grid.padded_row(row, width);
        let id = &cells[columns.id];
        if id.is_empty() || id.text.to_lowercase() == header_id {
            trace!(reference = grid.reference(row, columns.id), "skip non-project row");
            continue;
        }

        book.push(ProjectRecord {
            category,
            id: id.text.clone(),
            id_color: id.color.clone(),
            row_color: cells[columns.row_color].color.clone(),
            title: cells[columns.title].text.clone(),
            to_bali: cells[columns.to_bali].text.clone(),
            to_swiss: cells[columns.to_swiss].text.clone(),
            time: cells[columns.time].text.clone(),
            priority: cells[columns.priority].text.clone(),
            coordinator: cells[columns.coordinator].text.clone(),
            file_color: cells[columns.file].color.clone(),
            over_time: cells[columns.over_time].text.clone(),
            over_date: cells[columns.over_date].text.clone(),
            server: cells[columns.server].text.clone(),
        });
    }

    debug!(
        start_row,
        records = book.len(),
        "project rows classified"
    );
    book
}
