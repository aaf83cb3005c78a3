use thiserror::Error;

/// Core error type shared across NutriSave crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Input data that cannot be used, such as a malformed reference item.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Reading or writing a file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A JSON document could not be parsed or produced.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// The catalog JSON Schema could not be compiled.
    #[error("schema error: {0}")]
    Schema(String),
}

/// Convenience alias for results returned by NutriSave crates.
pub type Result<T> = std::result::Result<T, Error>;
