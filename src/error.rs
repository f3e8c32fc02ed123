use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;
use crate::count_source::CountSourceError;
use crate::models::ErrorResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Too many requests")]
    RateLimited,

    #[error("Count query failed: {0}")]
    DataSource(#[from] CountSourceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // clients only ever see a generic message, the detail goes to the log
        let (status, message) = match &self {
            AppError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "Too many requests"),
            AppError::DataSource(e) => {
                error!(error = %e, "count query failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
