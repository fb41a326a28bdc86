use thiserror::Error;

/// Top-level error type for Daybook.
///
/// Subsystem crates define their own error types; this one covers the
/// concerns shared by every crate (configuration, I/O, serialization).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DaybookError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for DaybookError {
    fn from(err: toml::de::Error) -> Self {
        DaybookError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for DaybookError {
    fn from(err: toml::ser::Error) -> Self {
        DaybookError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for DaybookError {
    fn from(err: serde_json::Error) -> Self {
        DaybookError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Daybook operations.
pub type Result<T> = std::result::Result<T, DaybookError>;
