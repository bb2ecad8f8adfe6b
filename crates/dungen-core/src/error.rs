//! Generator errors

use thiserror::Error;

/// Fatal errors surfaced by the generator
///
/// Running out of placement candidates is not an error: the assembler stops
/// early and returns the rooms placed so far.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid min or max")]
    InvalidRange { min: i32, max: i32 },

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenerateError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        GenerateError::Config(message.into())
    }
}
