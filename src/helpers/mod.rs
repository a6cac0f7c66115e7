//! Low-level helpers shared by the spreadsheet readers.

pub(crate) mod html;
pub(crate) mod xml;
