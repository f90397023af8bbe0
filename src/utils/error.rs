//! HTTP-facing error type
//!
//! Every failure leaves the service as a `500` with a `{"detail": "..."}` body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::ErrorResponse;
use crate::services::ClassifyError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Error: The AI model returned a malformed response.")]
    MalformedResponse,

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),

    #[error("Failed to fetch history: {0}")]
    HistoryUnavailable(String),
}

impl ApiError {
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedResponse | Self::Unexpected(_) | Self::HistoryUnavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }
}

impl From<ClassifyError> for ApiError {
    fn from(err: ClassifyError) -> Self {
        match err {
            ClassifyError::MalformedResponse => Self::MalformedResponse,
            ClassifyError::Unexpected(msg) => Self::Unexpected(msg),
            ClassifyError::History(e) => Self::HistoryUnavailable(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!("Request failed ({}): {}", status.as_u16(), self);

        let body = Json(ErrorResponse { detail: self.to_string() });
        (status, body).into_response()
    }
}
