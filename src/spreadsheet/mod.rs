//! # Spreadsheet Reconstruction Module
//!
//! Turns a published spreadsheet page (HTML with class-based cell styling) back
//! into a rectangular grid of text and background colors. Business meaning in
//! these sheets is carried by color as much as by text (day off, staff role,
//! file status), so every cell keeps both.
//!
//! Grids are indexed positionally: the extractors address cells by fixed row
//! and column offsets of a known template, never by header name.
pub(crate) mod cell;
pub(crate) mod grid;
pub(crate) mod html;
pub(crate) mod reference;
pub(crate) mod style;

pub use cell::{Cell, Color, ColorError};
pub use grid::{Grid, SpanMode};
pub use html::HtmlSheet;
pub use reference::{index_to_column, index_to_reference};
pub use style::StyleMap;
