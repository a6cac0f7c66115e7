use crate::error::RosterError;
use crate::helpers::html::{element_block, element_inner};
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::xml::XmlReader;
use crate::helpers::xml::XmlTextContextHelper;
use crate::match_xml_events;
use crate::spreadsheet::cell::{Cell, Color};
use crate::spreadsheet::grid::{Grid, SpanMode};
use crate::spreadsheet::style::StyleMap;
use quick_xml::events::Event;
use tracing::{debug, warn};

/// Element name for table rows
const TAG_ROW: &str = "tr";
/// Element name for data cells
const TAG_CELL: &str = "td";
/// Element name for header cells (row numbers in published sheets)
const TAG_HEADER_CELL: &str = "th";
/// Element name for the table itself
const TAG_TABLE: &str = "table";
/// Upper bound for `colspan`, as browsers clamp it
const MAX_COLSPAN: usize = 1000;

/// A table cell as written in the document, before span expansion and style resolution.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RawCell {
    /// Visible text, each text run trimmed and concatenated
    pub(crate) text: String,
    /// First CSS class of the cell
    pub(crate) class: Option<String>,
    /// Columns occupied by the cell (at least 1)
    pub(crate) span: usize,
}

/// A published spreadsheet page: its class colors and the rows of its first table.
#[derive(Clone, Debug, Default)]
pub struct HtmlSheet {
    styles: StyleMap,
    rows: Vec<Vec<RawCell>>,
    default_color: Color,
}

impl HtmlSheet {
    /// Parses an exported HTML page.
    ///
    /// Missing `<style>` or `<table>` blocks yield an empty style map or an
    /// empty table. Markup the reader cannot tokenize ends the table early:
    /// the rows read up to that point are kept and a warning is logged.
    pub fn parse(html: &str, default_color: &Color) -> Self {
        let styles = match element_inner(html, "style") {
            Some(css) => StyleMap::parse(css),
            None => {
                debug!("document has no style block");
                StyleMap::default()
            }
        };
        let rows = match element_block(html, TAG_TABLE) {
            Some(table) => read_table_rows(table),
            None => {
                debug!("document has no table");
                Vec::new()
            }
        };
        debug!(rows = rows.len(), classes = styles.len(), "html sheet parsed");
        HtmlSheet {
            styles,
            rows,
            default_color: default_color.clone(),
        }
    }

    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    /// Number of non-empty table rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Lays the table out as a grid of text and resolved colors.
    ///
    /// With [`SpanMode::Expand`] a cell with `colspan="N"` is repeated N times,
    /// so every row's width equals the sum of its spans.
    pub fn grid(&self, mode: SpanMode) -> Grid {
        let rows = self
            .rows
            .iter()
            .map(|raw_row| {
                let mut row = Vec::with_capacity(raw_row.len());
                for raw in raw_row {
                    let color = self.styles.resolve(raw.class.as_deref(), &self.default_color);
                    let repeat = match mode {
                        SpanMode::Expand => raw.span,
                        SpanMode::Collapse => 1,
                    };
                    for _ in 0..repeat {
                        row.push(Cell::new(raw.text.clone(), color.clone()));
                    }
                }
                row
            })
            .collect();
        Grid::new(rows, self.default_color.clone())
    }
}

/// Reads every row of a `<table>` block, dropping rows without cells.
pub(crate) fn read_table_rows(table: &str) -> Vec<Vec<RawCell>> {
    let mut builder = RowBuilder::default();
    let mut reader = XmlReader::new(table.as_bytes());
    if let Err(error) = read_events(&mut reader, &mut builder) {
        warn!(
            position = reader.position(),
            rows = builder.rows.len(),
            "stop reading table on malformed markup: {}",
            error
        );
    }
    builder.finish()
}

fn read_events(reader: &mut XmlReader<&[u8]>, builder: &mut RowBuilder) -> Result<(), RosterError> {
    match_xml_events!(reader => {
        Event::Start(event) => {
            let name = event.tag_name();
            match name.as_str() {
                TAG_ROW => builder.open_row(),
                TAG_CELL | TAG_HEADER_CELL => {
                    let class = event
                        .get_attribute_value("class")?
                        .and_then(|value| value.split_whitespace().next().map(str::to_owned));
                    let span = event
                        .get_attribute_value("colspan")?
                        .map(|value| parse_span(&value))
                        .unwrap_or(1);
                    builder.open_cell(class, span);
                }
                _ => builder.boundary(),
            }
        }
        Event::End(event) => {
            let name = String::from_utf8_lossy(event.local_name().as_ref()).to_ascii_lowercase();
            match name.as_str() {
                TAG_ROW => builder.close_row(),
                TAG_CELL | TAG_HEADER_CELL => builder.close_cell(),
                TAG_TABLE => break,
                _ => builder.boundary(),
            }
        }
        Event::Text(event) if builder.in_cell() => builder.run.push_bytes_text(&event)?,
        Event::GeneralRef(event) if builder.in_cell() => builder.run.push_bytes_ref(&event)?,
        Event::CData(event) if builder.in_cell() => {
            builder.run.push_str(&String::from_utf8_lossy(&event));
        }
    });
    Ok(())
}

/// Parses a `colspan` attribute; missing, invalid or zero spans count as one column.
fn parse_span(value: &str) -> usize {
    match value.trim().parse::<usize>() {
        Ok(0) | Err(_) => 1,
        Ok(span) => span.min(MAX_COLSPAN),
    }
}

/// Accumulates rows while tolerating the implicit closes HTML allows
/// (`<td>` without `</td>`, `<tr>` without `</tr>`).
#[derive(Default)]
struct RowBuilder {
    rows: Vec<Vec<RawCell>>,
    row: Option<Vec<RawCell>>,
    cell: Option<(Option<String>, usize)>,
    /// Text of the cell so far
    text: String,
    /// Current text run, trimmed when a tag boundary is reached
    run: String,
}

impl RowBuilder {
    fn in_cell(&self) -> bool {
        self.cell.is_some()
    }

    fn open_row(&mut self) {
        self.close_row();
        self.row = Some(Vec::new());
    }

    fn close_row(&mut self) {
        self.close_cell();
        if let Some(row) = self.row.take() {
            if row.is_empty() {
                debug!(index = self.rows.len(), "drop row without cells");
            } else {
                self.rows.push(row);
            }
        }
    }

    fn open_cell(&mut self, class: Option<String>, span: usize) {
        self.close_cell();
        if self.row.is_none() {
            self.row = Some(Vec::new());
        }
        self.cell = Some((class, span));
    }

    fn close_cell(&mut self) {
        self.boundary();
        if let Some((class, span)) = self.cell.take() {
            let text = std::mem::take(&mut self.text);
            self.row.get_or_insert_with(Vec::new).push(RawCell { text, class, span });
        }
    }

    /// A tag boundary inside a cell ends the current text run.
    fn boundary(&mut self) {
        if self.cell.is_some() {
            self.text.push_str(self.run.trim());
        }
        self.run.clear();
    }

    fn finish(mut self) -> Vec<Vec<RawCell>> {
        self.close_row();
        self.rows
    }
}
