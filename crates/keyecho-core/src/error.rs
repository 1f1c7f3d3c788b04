use thiserror::Error;

/// Top-level error type for keyecho.
///
/// The change describer itself never fails; these variants cover the
/// configuration and scripting layers around it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KeyechoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Script error on line {line}: {message}")]
    Script { line: usize, message: String },
}

impl From<toml::de::Error> for KeyechoError {
    fn from(err: toml::de::Error) -> Self {
        KeyechoError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for KeyechoError {
    fn from(err: toml::ser::Error) -> Self {
        KeyechoError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for KeyechoError {
    fn from(err: serde_json::Error) -> Self {
        KeyechoError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for keyecho operations.
pub type Result<T> = std::result::Result<T, KeyechoError>;
