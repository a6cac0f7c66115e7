//! Extracts the staff skill matrix from the talent sheet.
//!
//! The talent sheet is read cell by cell, without span expansion: its column
//! offsets count `<td>` elements, not visual columns.
use crate::config::TalentLayout;
use crate::spreadsheet::{index_to_column, Grid};
use serde::Serialize;
use tracing::debug;

/// A single skill column of a staff record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Skill {
    pub name: String,
    /// Raw level text: `1`..`5`, `5.1`, `M`, `W`, or empty
    pub level: String,
}

/// One staff member of the talent sheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TalentRecord {
    pub staff_name: String,
    /// Role derived from the background color of the name cell
    pub role: String,
    pub hire_date: String,
    pub skills: Vec<Skill>,
}

impl TalentRecord {
    pub fn skill(&self, name: &str) -> Option<&str> {
        self.skills
            .iter()
            .find(|skill| skill.name == name)
            .map(|skill| skill.level.as_str())
    }
}

/// The skill matrix: every record carries exactly the skills named in `skill_names`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Talent {
    /// Header label of the name column
    pub staff_label: String,
    /// Header label of the hire date column
    pub hire_date_label: String,
    pub skill_names: Vec<String>,
    pub records: Vec<TalentRecord>,
}

impl Talent {
    pub fn find(&self, staff_name: &str) -> Option<&TalentRecord> {
        self.records.iter().find(|record| record.staff_name == staff_name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Builds the skill matrix from a collapsed grid of the talent sheet.
///
/// Rows after the header row qualify when they hold more than `min_cells`
/// cells and a non-empty name. The table is as wide as its widest qualifying
/// row; columns without header text are labeled with their column letter.
pub fn extract_talent(grid: &Grid, layout: &TalentLayout) -> Talent {
    let Some(header) = grid.row(layout.header_row) else {
        debug!(rows = grid.len(), header_row = layout.header_row, "talent sheet has no header row");
        return Talent::default();
    };

    let rows: Vec<usize> = (layout.header_row + 1..grid.len())
        .filter(|row| {
            grid.row(*row).map_or(0, <[_]>::len) > layout.min_cells && !grid.text(*row, layout.name_col).is_empty()
        })
        .collect();
    let width = rows
        .iter()
        .filter_map(|row| grid.row(*row).map(<[_]>::len))
        .max()
        .unwrap_or(0);

    let labels: Vec<String> = (0..width)
        .map(|col| match header.get(col) {
            Some(cell) if !cell.is_empty() => cell.text.clone(),
            _ => index_to_column(col),
        })
        .collect();
    let label = |col: usize| labels.get(col).cloned().unwrap_or_else(|| index_to_column(col));

    let skill_names: Vec<String> = labels.iter().skip(layout.first_skill_col).cloned().collect();
    let records: Vec<TalentRecord> = rows
        .iter()
        .map(|row| TalentRecord {
            staff_name: grid.text(*row, layout.name_col).to_owned(),
            role: layout.role_for(grid.color(*row, layout.name_col)).to_owned(),
            hire_date: grid.text(*row, layout.hire_date_col).to_owned(),
            skills: skill_names
                .iter()
                .enumerate()
                .map(|(offset, name)| Skill {
                    name: name.clone(),
                    level: grid.text(*row, layout.first_skill_col + offset).to_owned(),
                })
                .collect(),
        })
        .collect();
    debug!(records = records.len(), skills = skill_names.len(), "talent rows extracted");

    Talent {
        staff_label: label(layout.name_col),
        hire_date_label: label(layout.hire_date_col),
        skill_names,
        records,
    }
}
