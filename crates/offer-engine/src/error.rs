//! Error types for offer assembly

use clause_engine::LibraryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OfferError {
    /// A dataset file is missing from the data directory
    #[error("Data file not found: {0}")]
    DataNotFound(String),

    #[error("Invalid {dataset} data: {source}")]
    InvalidData {
        dataset: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Client input names an entity the data source does not have
    #[error("{kind} not found: {name}")]
    EntityNotFound { kind: &'static str, name: String },

    #[error(transparent)]
    Library(#[from] LibraryError),
}

impl OfferError {
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        OfferError::EntityNotFound {
            kind,
            name: name.into(),
        }
    }

    /// True for errors caused by the request rather than the data source
    pub fn is_client_error(&self) -> bool {
        matches!(self, OfferError::EntityNotFound { .. })
    }
}
