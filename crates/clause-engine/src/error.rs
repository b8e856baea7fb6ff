//! Error types for clause library loading

use thiserror::Error;

/// The clause library could not be loaded
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Clause library is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Clause '{clause_id}' is missing required field '{field}'")]
    MissingField {
        clause_id: String,
        field: &'static str,
    },

    #[error("Duplicate clause id: {0}")]
    DuplicateClause(String),
}
