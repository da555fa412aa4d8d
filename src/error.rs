use thiserror::Error;

use crate::pipeline::score::ScoreParseError;

#[derive(Error, Debug)]
pub enum ServeForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Score Parsing Error in match '{match_id}': {source}")]
    Score {
        match_id: String,
        #[source]
        source: ScoreParseError,
    },

    #[error("Schema Mismatch: missing column '{column}'")]
    MissingColumn { column: String },

    #[error("Schema Mismatch: {0}")]
    Schema(String),

    #[error("Empty Selection: {0}")]
    EmptySelection(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

impl ServeForgeError {
    pub fn missing_column(column: &str) -> Self {
        Self::MissingColumn {
            column: column.to_string(),
        }
    }
}

pub type SfResult<T> = Result<T, ServeForgeError>;
