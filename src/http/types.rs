use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::error::ServiceError;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMessage { pub message: String }

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self { Self { message: message.into() } }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The body was not acceptable JSON for the endpoint's schema.
    #[error("{0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Service(ServiceError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Service(err @ ServiceError::NotFound { .. }) => (StatusCode::NOT_FOUND, err.to_string()),
            ApiError::Service(err @ ServiceError::Storage(_)) => {
                tracing::error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        (status, axum::Json(ApiMessage::new(message))).into_response()
    }
}

/// `Json` extractor whose rejections are reported as 400 with an [`ApiMessage`] body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

pub type ApiResult<T> = Result<T, ApiError>;
