use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed input in {} (line {line}): {message}", .file.display())]
    MalformedInput {
        file: PathBuf,
        line: u64,
        message: String,
    },

    #[error("Input directory missing or unreadable: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Failed to load canonical table {} (line {line}): {message}", .path.display())]
    CanonicalLoad {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProcessingError {
    pub fn malformed(file: impl Into<PathBuf>, line: u64, message: impl Into<String>) -> Self {
        ProcessingError::MalformedInput {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    pub fn canonical(path: impl Into<PathBuf>, line: u64, message: impl Into<String>) -> Self {
        ProcessingError::CanonicalLoad {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}
