use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Everything a request can fail with. All variants are recoverable within
/// the request; none abort the process.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or oversized form field.
    #[error("{0}")]
    Validation(String),

    /// Username or email collision at registration time.
    #[error("Username or email already exists. Please choose a different one.")]
    DuplicateIdentity,

    /// Bad credentials. The message never distinguishes an unknown username
    /// from a wrong password.
    #[error("Bad name/password")]
    AuthFailure,

    /// Session/ownership mismatch. Not surfaced as an error body; the caller
    /// is redirected to the login page.
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] sqlx::Error),

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error(transparent)]
    Token(#[from] jsonwebtoken::errors::Error),
}

fn fail(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "status": "fail",
            "message": message,
        })),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => Redirect::to("/login").into_response(),
            ApiError::Validation(message) => fail(StatusCode::BAD_REQUEST, &message),
            ApiError::DuplicateIdentity => fail(StatusCode::CONFLICT, &self.to_string()),
            ApiError::AuthFailure => fail(StatusCode::BAD_REQUEST, &self.to_string()),
            ApiError::NotFound => fail(StatusCode::NOT_FOUND, "Resource not found"),
            ApiError::Store(e) => {
                error!("database error: {e}");
                fail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            ApiError::Hash(e) => {
                error!("hashing error: {e}");
                fail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            ApiError::Token(e) => {
                error!("token error: {e}");
                fail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}
