use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: &'static str, id: u32 },

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Invalid value '{value}' for {field}")]
    InvalidInput { field: &'static str, value: String },

    #[error("No free {kind} id left")]
    IdsExhausted { kind: &'static str },

    #[error("Total of {0} is out of range")]
    Overflow(&'static str),

    #[error("Missing field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid record on CSV row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("Corrupt data file {}: {source}", path.display())]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Input closed")]
    EndOfInput,

    #[error("Expression error: {0}")]
    Expression(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl AssistantError {
    /// Errors a menu loop reports and survives.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            AssistantError::CorruptData { .. }
                | AssistantError::EndOfInput
                | AssistantError::Io(_)
                | AssistantError::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AssistantError>;
