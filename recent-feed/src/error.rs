use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::types::{FeedError, ValidationError};

/// Errors as seen by HTTP clients. Messages never carry storage details.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(#[from] ValidationError),

    #[error("Failed to retrieve recent entries")]
    FeedUnavailable,

    #[error("Failed to retrieve entries for {0}")]
    EntriesUnavailable(String),

    #[error("Failed to encode response")]
    Encoding,
}

impl From<FeedError> for AppError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::Validation(e) => {
                warn!("Rejected feed request: {}", e);
                AppError::BadRequest(e)
            }
            FeedError::ListUsers(source) => {
                error!("Failed to retrieve users: {:#}", source);
                AppError::FeedUnavailable
            }
            FeedError::Aggregation { username, source } => {
                error!(username = %username, "Failed to retrieve entries for user {}: {:#}", username, source);
                AppError::FeedUnavailable
            }
            FeedError::Encoding(e) => {
                error!("Failed to encode response: {}", e);
                AppError::Encoding
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::FeedUnavailable
            | AppError::EntriesUnavailable { .. }
            | AppError::Encoding => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
