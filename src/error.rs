use thiserror::Error;

/// Main error type for the roster extraction library.
/// Aggregates errors from the standard library, dependencies and internal modules.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("{0}")]
    WithContextError(String),

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    // Third-party library errors
    #[error("{0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("{0}")]
    XmlEncodingError(#[from] quick_xml::encoding::EncodingError),

    #[error("{0}")]
    XmlAttributeError(#[from] quick_xml::events::attributes::AttrError),

    #[error("{0}")]
    TomlError(#[from] toml::de::Error),

    // Configuration errors
    #[error("{0}")]
    ConfigError(#[from] crate::config::ConfigError),

    // Extraction errors
    #[error("{0}")]
    ScheduleError(#[from] crate::extract::schedule::ScheduleError),
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, RosterError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| RosterError::WithContextError(format!("{}: {}", message, e)))
    }
}
