use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::core::StoreError;

pub const LOAD_TOYS_FAILED: &str = "Cannot load toys";
pub const GET_TOY_FAILED: &str = "Cannot get toy";
pub const ADD_TOY_FAILED: &str = "Cannot add toy";
pub const UPDATE_TOY_FAILED: &str = "Cannot update toy";
pub const DELETE_TOY_FAILED: &str = "Cannot delete toy";

/// Plain-text HTTP failure.
///
/// Every failure kind is reported as `400 Bad Request`; clients written
/// against this API do not distinguish "not found" from server faults.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Logs `err` under `context` and answers with `message`.
    pub fn logged(
        context: &'static str,
        err: impl std::fmt::Display,
        message: impl Into<String>,
    ) -> Self {
        error!(error = %err, "{context}");
        Self::bad_request(message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Maps a store failure to the message each route has always answered with.
pub fn load_failed(err: StoreError) -> ApiError {
    ApiError::logged(LOAD_TOYS_FAILED, err, LOAD_TOYS_FAILED)
}

/// `GET /api/toy/:id` echoes the store error text itself.
pub fn get_failed(err: StoreError) -> ApiError {
    let message = err.to_string();
    ApiError::logged(GET_TOY_FAILED, err, message)
}

pub fn add_failed(err: impl std::fmt::Display) -> ApiError {
    ApiError::logged(ADD_TOY_FAILED, err, ADD_TOY_FAILED)
}

pub fn update_failed(err: impl std::fmt::Display) -> ApiError {
    ApiError::logged(UPDATE_TOY_FAILED, err, UPDATE_TOY_FAILED)
}

pub fn delete_failed(err: StoreError) -> ApiError {
    let message = format!("{DELETE_TOY_FAILED}, {err}");
    ApiError::logged(DELETE_TOY_FAILED, err, message)
}
