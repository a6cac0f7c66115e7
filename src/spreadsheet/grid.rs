use crate::spreadsheet::cell::{Cell, Color};
use crate::spreadsheet::reference::index_to_reference;
use serde::Serialize;

/// How `colspan` is treated when laying cells out in a grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SpanMode {
    /// A cell spanning N columns occupies N consecutive positions
    #[default]
    Expand,
    /// Every `<td>`/`<th>` occupies exactly one position
    Collapse,
}

/// Row-aligned grid of cells reconstructed from an HTML table.
///
/// Rows keep the width the source gave them; positional accessors treat
/// anything past the end of a row as an empty cell with the default color,
/// so short rows never cause an out-of-bounds access.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
    default_color: Color,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>, default_color: Color) -> Self {
        Grid { rows, default_color }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn default_color(&self) -> &Color {
        &self.default_color
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Text at a position, empty when outside the row.
    pub fn text(&self, row: usize, col: usize) -> &str {
        self.cell(row, col).map(|cell| cell.text.as_str()).unwrap_or("")
    }

    /// Color at a position, the default color when outside the row.
    pub fn color(&self, row: usize, col: usize) -> &Color {
        self.cell(row, col).map(|cell| &cell.color).unwrap_or(&self.default_color)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(col)
    }

    /// A copy of a row padded (or truncated) to exactly `width` cells.
    pub fn padded_row(&self, row: usize, width: usize) -> Vec<Cell> {
        (0..width)
            .map(|col| {
                self.cell(row, col)
                    .cloned()
                    .unwrap_or_else(|| Cell::blank(&self.default_color))
            })
            .collect()
    }

    /// `width` cells starting at `col`, padded past the end of the row.
    pub fn slice(&self, row: usize, col: usize, width: usize) -> Vec<Cell> {
        (col..col + width)
            .map(|index| {
                self.cell(row, index)
                    .cloned()
                    .unwrap_or_else(|| Cell::blank(&self.default_color))
            })
            .collect()
    }

    /// The text grid, one `Vec<String>` per row.
    pub fn values(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.text.clone()).collect())
            .collect()
    }

    /// The color grid, row-aligned with [`Grid::values`].
    pub fn colors(&self) -> Vec<Vec<Color>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.color.clone()).collect())
            .collect()
    }

    /// Spreadsheet reference of a position, for diagnostics.
    pub fn reference(&self, row: usize, col: usize) -> String {
        index_to_reference(row, col)
    }
}
