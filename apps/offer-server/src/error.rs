//! Error types for the offer server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use offer_engine::OfferError;
use serde::Serialize;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    /// Request names a port, cargo or charterer the data source lacks
    #[error("{0}")]
    EntityNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Data error: {0}")]
    Data(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::EntityNotFound(_) | ServerError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::Data(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ServerError::EntityNotFound(_) => "ENTITY_NOT_FOUND",
            ServerError::InvalidRequest(_) => "INVALID_REQUEST",
            ServerError::Data(_) => "DATA_ERROR",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code: self.code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<OfferError> for ServerError {
    fn from(err: OfferError) -> Self {
        if err.is_client_error() {
            ServerError::EntityNotFound(err.to_string())
        } else {
            ServerError::Data(err.to_string())
        }
    }
}
