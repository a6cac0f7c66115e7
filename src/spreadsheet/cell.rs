use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Errors related to hex color parsing.
#[derive(Error, Debug)]
pub enum ColorError {
    #[error("Invalid hex color '{0}'")]
    InvalidHex(String),
}

/// Background color in canonical `#rrggbb` form (lowercase, six digits).
///
/// Three- and four-digit shorthands are expanded digit by digit; alpha
/// channels (`#rgba`, `#rrggbbaa`) are dropped, so colors compare equal
/// regardless of how the stylesheet spelled them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// The default background of an unstyled cell.
    pub fn white() -> Self {
        Color("#ffffff".to_owned())
    }

    /// Parses a 3, 4, 6 or 8 digit hex color, with or without the leading `#`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let digits = value.strip_prefix('#').unwrap_or(value);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let digits = digits.to_ascii_lowercase();
        let canonical = match digits.len() {
            3 | 4 => digits.chars().take(3).flat_map(|c| [c, c]).collect::<String>(),
            6 | 8 => digits[..6].to_owned(),
            _ => return None,
        };
        Some(Color(format!("#{}", canonical)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::white()
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value).ok_or(ColorError::InvalidHex(value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single grid position: the visible text and the resolved background color.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Whitespace-trimmed visible text
    pub text: String,
    /// Background color resolved through the style map
    pub color: Color,
}

impl Cell {
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Cell {
            text: text.into(),
            color,
        }
    }

    /// An empty cell with the given background, used for padding short rows.
    pub fn blank(color: &Color) -> Self {
        Cell {
            text: String::new(),
            color: color.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
