use axum::{http::StatusCode, Json};
use serde_json::json;
use thiserror::Error;

/// Failure talking to the plan service.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("plan service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid plan service url: {0}")]
    InvalidUrl(String),
    #[error("plan not found")]
    NotFound,
    #[error("plan service returned {status} for {url}")]
    Status { status: StatusCode, url: String },
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound => Self {
                status: StatusCode::NOT_FOUND,
                message: "plan not found".to_string(),
            },
            other => Self::bad_gateway(other.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
